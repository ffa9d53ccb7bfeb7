pub mod health;
pub mod prediction;
pub mod transactions;

use crate::schemas::ErrorResponse;
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Json};
use axum_valid::{ValidRejection, ValidationRejection};
use compute::ForecastError;
use model::StoreError;
use tracing::{error, warn};

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Translate a dataset failure into the client-facing error.
pub fn store_error(error: StoreError) -> ApiError {
    match error {
        StoreError::DataUnavailable { path } => {
            warn!("Transaction dataset missing at {}", path.display());
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Mock data file not found.", "DATA_UNAVAILABLE")),
            )
        }
        StoreError::DataMalformed(detail) => {
            warn!("Transaction dataset is malformed: {}", detail);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    format!("Invalid transaction data. {}", detail),
                    "DATA_MALFORMED",
                )),
            )
        }
        e @ StoreError::Io { .. } => {
            error!("{}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to read transaction data", "DATA_READ_ERROR")),
            )
        }
    }
}

/// Translate a rejected JSON body into the client-facing error. Bodies that do
/// not deserialize and bodies that fail validation both answer 400.
pub fn request_error(rejection: ValidRejection<JsonRejection>) -> ApiError {
    let detail = match rejection {
        ValidationRejection::Valid(errors) => errors.to_string(),
        ValidationRejection::Inner(rejection) => rejection.body_text(),
    };
    warn!("Request rejected: {}", detail);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(
            format!("Invalid request. {}", detail),
            "INVALID_REQUEST",
        )),
    )
}

/// Translate a forecast failure into the client-facing error. Upstream errors
/// carry their text through to the caller.
pub fn forecast_error(error: ForecastError) -> ApiError {
    let (status, code) = match &error {
        ForecastError::InvalidHorizon => (StatusCode::BAD_REQUEST, "INVALID_HORIZON"),
        ForecastError::EmptyHistory => (StatusCode::BAD_REQUEST, "EMPTY_HISTORY"),
        ForecastError::UpstreamCall(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_CALL_ERROR"),
        ForecastError::UpstreamParse(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_PARSE_ERROR"),
        ForecastError::InvalidWalkBounds { .. } | ForecastError::Serialization(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "FORECAST_ERROR")
        }
    };

    if status.is_server_error() {
        error!("Forecast failed: {}", error);
    } else {
        warn!("Forecast rejected: {}", error);
    }
    (status, Json(ErrorResponse::new(error.to_string(), code)))
}
