//! Error types for motion playback

use serde::{Deserialize, Serialize};

/// Errors surfaced by motion setup, fade computation and queue updates
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionError {
    /// An argument the caller was required to keep valid was not
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A computed value escaped the range its contract guarantees
    #[error("Contract violation: {what} = {value}")]
    ContractViolation { what: String, value: f32 },

    /// Configuration document failed to parse
    #[error("Config error: {reason}")]
    Config { reason: String },
}

impl MotionError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "argument",
            Self::ContractViolation { .. } => "contract",
            Self::Config { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}

/// Motion result type
pub type Result<T> = std::result::Result<T, MotionError>;
