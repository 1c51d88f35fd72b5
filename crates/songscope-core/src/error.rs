//! Error types for dataset loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the dataset.
///
/// Every variant is fatal to the session: the dashboard shows the message and
/// stops initializing.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Failed to read the dataset file
    #[error("failed to read dataset '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not a JSON array of records
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Transport failure while fetching the dataset over HTTP
    #[error("failed to fetch dataset: {0}")]
    Fetch(String),
}

impl DatasetError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        DatasetError::Fetch(message.into())
    }
}
