use crate::handlers::{forecast_error, request_error, store_error, ApiError};
use crate::schemas::{AppState, ErrorResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::{Valid, ValidRejection};
use common::{ForecastPoint, PredictionRequest};
use tracing::{debug, info, instrument, trace};

/// Forecast the account balance for the coming months
#[utoipa::path(
    post,
    path = "/api/prediction",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Predicted month-end balances", body = Vec<ForecastPoint>),
        (status = 400, description = "Invalid request body, malformed dataset or empty history", body = ErrorResponse),
        (status = 404, description = "Dataset file not found", body = ErrorResponse),
        (status = 500, description = "Completion service failed or returned unusable output", body = ErrorResponse)
    ),
    tag = "prediction"
)]
#[instrument(skip(state, request))]
pub async fn predict(
    State(state): State<AppState>,
    request: Result<Valid<Json<PredictionRequest>>, ValidRejection<JsonRejection>>,
) -> Result<(StatusCode, Json<Vec<ForecastPoint>>), ApiError> {
    trace!("Entering predict function");
    let Valid(Json(request)) = request.map_err(request_error)?;
    debug!("Forecast requested for {} months", request.months);

    let history = state.store.load_history().await.map_err(store_error)?;
    debug!("Loaded {} historical transactions", history.len());

    let predictions = state
        .forecaster
        .forecast(&history, request.months)
        .await
        .map_err(forecast_error)?;

    info!("Returning {} predictions", predictions.len());
    Ok((StatusCode::OK, Json(predictions)))
}
