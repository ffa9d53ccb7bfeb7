use thiserror::Error;

use crate::completion::CompletionError;

/// Error types for the forecast module
#[derive(Error, Debug)]
pub enum ForecastError {
    /// The requested horizon is zero months
    #[error("Forecast horizon must be at least one month")]
    InvalidHorizon,

    /// There is no history to forecast from
    #[error("Transaction history is empty")]
    EmptyHistory,

    /// Random-walk bounds that cannot produce a delta
    #[error("Random walk bounds are invalid: min_delta {min} must be below max_delta {max}")]
    InvalidWalkBounds { min: i64, max: i64 },

    /// The history could not be serialized into the prompt
    #[error("Failed to serialize transaction history: {0}")]
    Serialization(String),

    /// The completion service could not be reached or refused the request
    #[error("Error calling LLM: {0}")]
    UpstreamCall(#[from] CompletionError),

    /// The completion service answered with something other than the expected JSON
    #[error("Failed to deserialize LLM response: {0}")]
    UpstreamParse(String),
}

/// Type alias for Result with ForecastError
pub type Result<T> = std::result::Result<T, ForecastError>;
