//! All error types for the csvstrings crate.
//!
//! Row-level anomalies (unparseable lines, blank keys) are skipped and never
//! surface here; everything in this enum aborts the current run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("not enough arguments: no configuration found and no input files given")]
    MissingConfig,

    #[error("malformed CSV header: {0}")]
    MalformedHeader(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Creates a new malformed-header error
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Error::MalformedHeader(message.into())
    }

    /// Creates a new invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }
}
