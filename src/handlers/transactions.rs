use crate::handlers::{store_error, ApiError};
use crate::schemas::{AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use common::TransactionEnvelope;
use tracing::{info, instrument, trace};

/// Get the historical transaction dataset
#[utoipa::path(
    get,
    path = "/api/transactions",
    responses(
        (status = 200, description = "The full transaction dataset", body = TransactionEnvelope),
        (status = 400, description = "Dataset does not match the expected shape", body = ErrorResponse),
        (status = 404, description = "Dataset file not found", body = ErrorResponse),
        (status = 500, description = "Dataset could not be read", body = ErrorResponse)
    ),
    tag = "transactions"
)]
#[instrument(skip(state))]
pub async fn get_transactions(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<TransactionEnvelope>), ApiError> {
    trace!("Entering get_transactions function");

    let envelope = state.store.load_dataset().await.map_err(store_error)?;
    info!(
        "Returning {} transactions",
        envelope.data.transaction_items.len()
    );
    Ok((StatusCode::OK, Json(envelope)))
}
