//! Error types for the watcher.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WatchError>;

/// A data source could not be reached or its table could not be read.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Non-numeric value {value:?} in column {column:?} at row {row}")]
    MalformedCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Table has no columns")]
    MissingColumn,
}

/// The broadcast channel rejected or failed to deliver a message.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to publish message: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Missing notifier credential: set {0}")]
    MissingCredential(&'static str),
}

#[derive(Debug, Error)]
#[error("History file {path}: {source}")]
pub struct HistoryError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
