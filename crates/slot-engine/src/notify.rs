//! Fire-and-forget notifications for the user.
//!
//! The engine never blocks on a notice: it hands the message to a
//! [`NotificationSink`] and carries on.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    /// Informational; does not prevent further edits.
    Warning,
    /// A submission attempt was rejected.
    Blocking,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn blocking(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Blocking,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Blocking => "error",
        };
        write!(f, "{}: {}", tag, self.message)
    }
}

pub trait NotificationSink {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices in memory.
impl NotificationSink for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Forwards notices to `tracing` at a level matching their severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Info => tracing::info!(target: "slot_engine::notice", "{}", notice.message),
            Severity::Warning => tracing::warn!(target: "slot_engine::notice", "{}", notice.message),
            Severity::Blocking => {
                tracing::error!(target: "slot_engine::notice", "{}", notice.message)
            }
        }
    }
}
