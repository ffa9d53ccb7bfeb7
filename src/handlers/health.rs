use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{debug, instrument};
use crate::schemas::{AppState, ErrorResponse, HealthResponse};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Service is unhealthy", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    // The dataset is read per request, so a missing file is reported but not fatal
    let dataset = if state.store.is_available().await {
        "available"
    } else {
        "missing"
    };
    debug!("Dataset {}", dataset);

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dataset: dataset.to_string(),
        forecast_backend: state.forecaster.backend().label().to_string(),
    };

    Ok(Json(response))
}
