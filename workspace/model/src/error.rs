use std::path::PathBuf;
use thiserror::Error;

/// Error types for transaction store access
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing dataset does not exist
    #[error("Transaction dataset not found at {}", path.display())]
    DataUnavailable { path: PathBuf },

    /// The dataset exists but could not be read
    #[error("Failed to read transaction dataset at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset does not match the expected schema
    #[error("Invalid transaction data: {0}")]
    DataMalformed(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::DataMalformed(error.to_string())
    }
}

/// Type alias for Result with StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
