#![forbid(unsafe_code)]

use dsviz_runtime::{PolicyConfigError, RaceError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] PolicyConfigError),

    #[error("race error: {0}")]
    Race(#[from] RaceError),

    #[error("invalid operation `{token}`: {reason}")]
    InvalidIntent { token: String, reason: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidIntent { .. } | Self::InvalidArgument { .. } | Self::Race(_) => 2,
            Self::Config(_) => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn intent(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIntent {
            token: token.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
