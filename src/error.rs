//! Errors surfaced by the binaries. The engine itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("invalid log filter: {0}")]
    LogFilter(String),

    #[error("logging already initialized: {0}")]
    LogInit(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
