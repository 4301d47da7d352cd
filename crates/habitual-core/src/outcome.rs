//! Structured results for user-facing operations.
//!
//! Every mutating operation on a collection, session or credential store
//! reports what happened as an [`Outcome`] instead of printing. The interface
//! layer decides how to render it.

use serde::{Deserialize, Serialize};

/// What an operation did to the state it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// State changed as requested
    Success,
    /// Request was valid but already satisfied; nothing changed
    NoOp,
    /// Input failed validation; nothing changed
    Rejected,
    /// The named habit or user does not exist; nothing changed
    NotFound,
}

/// Status plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self::with(OutcomeStatus::Success, message)
    }

    pub fn no_op(message: impl Into<String>) -> Self {
        Self::with(OutcomeStatus::NoOp, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::with(OutcomeStatus::Rejected, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with(OutcomeStatus::NotFound, message)
    }

    fn with(status: OutcomeStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// True when the operation changed state and should be persisted.
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
