//! Error types for kb
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, invalid config, empty title)
//! - 4: Operation failed (io, serialization, suggestion API)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the kb CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for kb operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    // Operation failures (exit code 4)
    #[error("{0}")]
    Suggestion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EmptyTitle | Error::InvalidConfig(_) | Error::ConfigNotFound(_) => {
                exit_codes::USER_ERROR
            }
            Error::Suggestion(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::Terminal(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for kb operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_group_by_kind() {
        assert_eq!(Error::EmptyTitle.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(
            Error::InvalidConfig("bad".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::Suggestion("unavailable".to_string()).exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }
}
