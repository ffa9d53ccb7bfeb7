use common::{
    ForecastPoint, NonValueTransactionItem, PredictionRequest, TransactionData,
    TransactionEnvelope, TransactionRecord,
};
use compute::Forecaster;
use model::TransactionStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Source of the transaction dataset
    pub store: Arc<dyn TransactionStore>,
    /// Forecast backend chosen at start-up
    pub forecaster: Arc<Forecaster>,
    /// Upper bound on the time spent serving one request
    pub request_timeout: Duration,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("forecaster", &self.forecaster)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Whether the transaction dataset is present ("available" or "missing")
    pub dataset: String,
    /// Active forecast backend ("external-service" or "random-walk")
    pub forecast_backend: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::transactions::get_transactions,
        crate::handlers::prediction::predict,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            PredictionRequest,
            ForecastPoint,
            TransactionEnvelope,
            TransactionData,
            TransactionRecord,
            NonValueTransactionItem,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "transactions", description = "Historical transaction dataset"),
        (name = "prediction", description = "Balance forecast endpoints"),
    ),
    info(
        title = "cashcast API",
        description = "Cash-flow dashboard API - historical transactions and balance forecasts",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
