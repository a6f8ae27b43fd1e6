//! Traffic source tags.
//!
//! Every exchange the host reports is tagged with the tool that issued it.
//! The capture hook only records traffic from one configured tool.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The host tool an exchange originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolType {
    /// Suite-level traffic not attributed to a specific tool.
    Suite,
    /// Site map / target tool.
    Target,
    /// Intercepting proxy.
    Proxy,
    /// Automated scanner.
    Scanner,
    /// Automated fuzzing tool.
    Intruder,
    /// Interactive manual-testing tool.
    Repeater,
    /// Traffic logger.
    Logger,
    /// Token randomness analyzer.
    Sequencer,
    /// Requests issued by other extensions.
    Extensions,
}

impl ToolType {
    /// Returns the display name of the tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::Suite => "Suite",
            ToolType::Target => "Target",
            ToolType::Proxy => "Proxy",
            ToolType::Scanner => "Scanner",
            ToolType::Intruder => "Intruder",
            ToolType::Repeater => "Repeater",
            ToolType::Logger => "Logger",
            ToolType::Sequencer => "Sequencer",
            ToolType::Extensions => "Extensions",
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
