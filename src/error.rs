//! Error types for loading the dataset and reading configuration.
//!
//! [`LoadError`] never reaches presentation code: the store logs it and
//! folds it into its observable error message.

use std::path::PathBuf;

/// Everything that can go wrong while fetching or parsing the dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The backing file could not be read.
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not a valid JSON dataset.
    #[error("parsing JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is not a valid CSV dataset.
    #[error("parsing CSV payload: {0}")]
    Csv(#[from] csv::Error),

    /// The location has an extension no parser handles.
    #[error("unsupported data format: .{0}")]
    UnsupportedFormat(String),

    /// The same country appears twice.
    #[error("duplicate country in dataset: {0}")]
    DuplicateCountry(String),

    /// The remote fetch failed or answered with a non-success status.
    #[cfg(feature = "http")]
    #[error("fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}
