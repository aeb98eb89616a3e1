//! Three-state result union passed from the repository to the screens
//!
//! `Outcome` carries either a finished domain value or a human-readable
//! failure message, so no error type crosses the repository boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Outcome<T> {
    Loading,
    Success(T),
    Failure(Option<String>),
}

impl<T> Outcome<T> {
    /// Shorthand for a failure with a message
    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure(Some(message.into()))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Outcome::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Consume the outcome, keeping only the success value
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Message carried by a `Failure`, if any
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Outcome::Failure(message) => message.as_deref(),
            _ => None,
        }
    }
}
