//! Progress of a screen's current attempt

use serde::{Deserialize, Serialize};

/// Where the screen's current attempt stands
///
/// Exactly one of loading, succeeded or failed can hold at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Status<T> {
    #[default]
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

impl<T> Status<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Status::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }

    /// `Some(true)` after success, `Some(false)` after failure, `None` otherwise
    pub fn result_flag(&self) -> Option<bool> {
        match self {
            Status::Succeeded(_) => Some(true),
            Status::Failed(_) => Some(false),
            Status::Idle | Status::Loading => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Status::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Status::Succeeded(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_per_variant() {
        let idle: Status<u8> = Status::Idle;
        assert!(idle.is_idle());
        assert_eq!(idle.result_flag(), None);
        assert_eq!(idle.error_message(), None);

        let loading: Status<u8> = Status::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.result_flag(), None);

        let done = Status::Succeeded(7u8);
        assert_eq!(done.result_flag(), Some(true));
        assert_eq!(done.payload(), Some(&7));
        assert!(!done.is_loading());

        let failed: Status<u8> = Status::Failed("Invalid data".to_string());
        assert_eq!(failed.result_flag(), Some(false));
        assert_eq!(failed.error_message(), Some("Invalid data"));
        assert_eq!(failed.payload(), None);
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(Status::<u8>::default(), Status::Idle);
    }
}
