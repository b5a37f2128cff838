//! Crate-level error type.

use thiserror::Error;

use crate::calculator::CalcError;

/// Errors from the calculator and its on-disk stores.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Calculator error: {0}")]
    Calc(#[from] CalcError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("No {0} directory available on this platform")]
    NoDirectory(&'static str),
}

/// Result type for dfcalc operations.
pub type Result<T> = std::result::Result<T, Error>;
