//! Errors for everything around the capture core
//!
//! The state machine itself is total; these only come from config loading,
//! action logs and the server.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasscamError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PasscamError>;
