use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnitypeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database not found at: {0}")]
    DatabaseNotFound(String),
    #[error("Invalid abbreviation: {0}")]
    InvalidAbbreviation(String),
    #[error("Abbreviation '{0}' not found")]
    ShortcutNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Buffer error: {0}")]
    Buffer(String),
    #[error("Error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, UnitypeError>;
