use common::{ForecastPoint, PredictionRequest, TransactionEnvelope};
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use crate::settings;

/// Error Response
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub success: bool,
}

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

/// Text shown to the user for a non-OK response: the server's error message
/// when the body carries one, the bare status otherwise.
async fn error_text(endpoint: &str, response: Response) -> String {
    log::warn!("{} - Non-OK response: {}", endpoint, response.status());
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(err) => {
            log::error!("{} - API error ({}): {}", endpoint, err.code, err.error);
            err.error
        }
        Err(_) => {
            let error_msg = format!("HTTP error: {}", status);
            log::error!("{} - {}", endpoint, error_msg);
            error_msg
        }
    }
}

/// Fetch the full transaction dataset
pub async fn get_transactions() -> Result<TransactionEnvelope, String> {
    let endpoint = "/transactions";
    let url = api_url(endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("GET {} - {}", endpoint, error_msg);
        error_msg
    })?;

    if !response.ok() {
        return Err(error_text(endpoint, response).await);
    }

    log::trace!("GET {} - Response received, parsing JSON", endpoint);
    let envelope: TransactionEnvelope = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("GET {} - {}", endpoint, error_msg);
        error_msg
    })?;

    log::info!(
        "GET {} - Success ({} transactions)",
        endpoint,
        envelope.data.transaction_items.len()
    );
    Ok(envelope)
}

/// Request a forecast for the next `months` months
pub async fn post_prediction(months: u32) -> Result<Vec<ForecastPoint>, String> {
    let endpoint = "/prediction";
    let url = api_url(endpoint);
    log::debug!("POST request to: {} (months = {})", url, months);

    let response = Request::post(&url)
        .json(&PredictionRequest { months })
        .map_err(|e| {
            let error_msg = format!("Failed to serialize request: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            error_msg
        })?
        .send()
        .await
        .map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            error_msg
        })?;

    if !response.ok() {
        return Err(error_text(endpoint, response).await);
    }

    log::trace!("POST {} - Response received, parsing JSON", endpoint);
    let predictions: Vec<ForecastPoint> = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("POST {} - {}", endpoint, error_msg);
        error_msg
    })?;

    log::info!("POST {} - Success ({} predictions)", endpoint, predictions.len());
    Ok(predictions)
}
