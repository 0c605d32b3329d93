// Error types shared by the booking flow, the inquiry forms and the host seam

use crate::submission::FormKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("No service selected or booking data missing")]
    MissingSelection,

    #[error("Page element not found: {0}")]
    HostElementMissing(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Cannot {action} while {state}")]
    InvalidTransition { state: String, action: String },

    #[error("Submission already in progress for {0}")]
    SubmissionInProgress(FormKind),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

