//! User-facing notices.
//!
//! Every action ends in exactly one notice. The host decides how to show it
//! (modal dialog, toast, status bar); this module only decides what it says.

use serde::{Deserialize, Serialize};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A titled message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

/// Displays notices to the user.
pub trait NoticeSink: Send + Sync {
    fn show(&self, notice: &Notice);
}

/// Notice sink that writes notices to the log.
///
/// Used when the host has no dialog surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotices;

impl NoticeSink for LogNotices {
    fn show(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => log::info!("[{}] {}", notice.title, notice.message),
            NoticeLevel::Error => log::error!("[{}] {}", notice.title, notice.message),
        }
    }
}
