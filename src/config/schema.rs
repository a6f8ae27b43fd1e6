//! Configuration schema for the history copy extension.
//!
//! This module defines the configuration structure and validation logic for all
//! user-configurable settings.

use super::keys::KeyChord;
use crate::models::ToolType;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the history copy extension.
///
/// All settings can be configured under the "repeater-history" key of the
/// host settings. Missing settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryCopyConfig {
    /// The only tool whose traffic is captured. Defaults to Repeater.
    #[serde(default = "default_capture_tool")]
    pub capture_tool: ToolType,

    /// Name registered with the host for this extension.
    #[serde(default = "default_extension_name")]
    pub extension_name: String,

    /// Title used on every notice dialog.
    #[serde(default = "default_notice_title")]
    pub notice_title: String,

    /// Whether "copy history" copies only the open request's destination.
    ///
    /// When false, the history action copies everything captured in the
    /// session regardless of destination. Defaults to true.
    #[serde(default = "default_group_by_destination")]
    pub group_by_destination: bool,

    /// Global hotkeys for the copy actions.
    #[serde(default)]
    pub key_bindings: KeyBindings,
}

/// Hotkeys bound to the copy actions. A missing binding disables the hotkey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyBindings {
    /// Copies the open request/response.
    #[serde(default = "default_copy_current_binding")]
    pub copy_current: Option<String>,

    /// Copies the captured history.
    #[serde(default = "default_copy_history_binding")]
    pub copy_history: Option<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            copy_current: default_copy_current_binding(),
            copy_history: default_copy_history_binding(),
        }
    }
}

impl Default for HistoryCopyConfig {
    fn default() -> Self {
        Self {
            capture_tool: default_capture_tool(),
            extension_name: default_extension_name(),
            notice_title: default_notice_title(),
            group_by_destination: default_group_by_destination(),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl HistoryCopyConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.extension_name.trim().is_empty() {
            return Err("extensionName must not be empty".to_string());
        }

        if self.notice_title.trim().is_empty() {
            return Err("noticeTitle must not be empty".to_string());
        }

        let current = self
            .key_bindings
            .copy_current
            .as_deref()
            .map(|s| s.parse::<KeyChord>())
            .transpose()
            .map_err(|e| format!("keyBindings.copyCurrent: {}", e))?;
        let history = self
            .key_bindings
            .copy_history
            .as_deref()
            .map(|s| s.parse::<KeyChord>())
            .transpose()
            .map_err(|e| format!("keyBindings.copyHistory: {}", e))?;

        if let (Some(current), Some(history)) = (current, history) {
            if current == history {
                return Err(format!(
                    "keyBindings.copyCurrent and keyBindings.copyHistory are both bound to {}",
                    current
                ));
            }
        }

        Ok(())
    }
}

// Default value functions for serde

fn default_capture_tool() -> ToolType {
    ToolType::Repeater
}

fn default_extension_name() -> String {
    "Repeater History Copy".to_string()
}

fn default_notice_title() -> String {
    "Repeater History Copy".to_string()
}

fn default_group_by_destination() -> bool {
    true
}

fn default_copy_current_binding() -> Option<String> {
    Some("Ctrl+Shift+C".to_string())
}

fn default_copy_history_binding() -> Option<String> {
    Some("Ctrl+Shift+H".to_string())
}
