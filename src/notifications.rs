// Notification Sink: transient user-facing messages
// notify() is fire-and-forget; implementations must not panic or block the caller

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

// Forwards notifications to the tracing subscriber of the embedding application
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => {
                tracing::info!(%severity, "{}", message)
            }
            Severity::Warning => tracing::warn!(%severity, "{}", message),
            Severity::Error => tracing::error!(%severity, "{}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

// Keeps every notification in order; used by tests and headless hosts
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries.lock().last().cloned()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.entries.lock().push(Notification {
            message: message.to_string(),
            severity,
        });
    }
}
