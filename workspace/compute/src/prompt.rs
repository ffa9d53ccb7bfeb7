//! Prompt construction and reply parsing for the external-service forecast.

use chrono::NaiveDateTime;
use common::{ForecastPoint, PredictionResponse, TransactionRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::completion::ResponseSchema;
use crate::error::{ForecastError, Result};

/// The slice of a transaction the model gets to see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub transaction_date: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    pub debit_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub credit_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub description: String,
}

impl From<&TransactionRecord> for HistoryEntry {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            transaction_date: record.transaction_date,
            debit_amount: record.debit_amount,
            credit_amount: record.credit_amount,
            balance: record.balance,
            description: record.description.clone(),
        }
    }
}

/// Projects `history` to prompt entries, oldest first.
pub fn project_history(history: &[TransactionRecord]) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = history.iter().map(HistoryEntry::from).collect();
    entries.sort_by_key(|entry| entry.transaction_date);
    entries
}

/// Marker that precedes the serialized history in the prompt.
pub const HISTORY_HEADING: &str = "## Transaction History";

/// Builds the instruction sent to the completion service.
pub fn build_prompt(history: &[TransactionRecord], months: u32) -> Result<String> {
    let entries = project_history(history);
    let history_json = serde_json::to_string(&entries)
        .map_err(|e| ForecastError::Serialization(e.to_string()))?;
    debug!(
        "Built prompt payload with {} entries ({} bytes)",
        entries.len(),
        history_json.len()
    );

    Ok(format!(
        r#"## Role
You are a financial analyst.

## Task
Using the transaction history below, forecast the cash flow of this account for the next {months} months.

## Requirements
- Analyze the income and spending patterns in the history.
- Project the balance at the end of each of the next {months} months, starting with the month after the latest transaction.
- Respond with a single JSON object shaped as {{"predictions":[{{"date":"YYYY-MM-DD","predictedBalance":0.0}}]}} containing exactly {months} predictions.
- Output ONLY that JSON. Do not use markdown formatting and do not add any explanation.

{HISTORY_HEADING}
{history_json}
"#
    ))
}

/// Structured-output schema matching `PredictionResponse`.
pub fn prediction_schema() -> ResponseSchema {
    ResponseSchema {
        name: "PredictionResponse".to_string(),
        schema: json!({
            "type": "object",
            "properties": {
                "predictions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "date": { "type": "string", "description": "End-of-month date, YYYY-MM-DD" },
                            "predictedBalance": { "type": "number" }
                        },
                        "required": ["date", "predictedBalance"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["predictions"],
            "additionalProperties": false
        }),
    }
}

/// Parses the raw reply into forecast points, unmodified and in reply order.
pub fn parse_reply(reply: &str) -> Result<Vec<ForecastPoint>> {
    serde_json::from_str::<PredictionResponse>(reply.trim())
        .map(|response| response.predictions)
        .map_err(|e| {
            warn!("Completion reply is not a prediction object: {}", e);
            ForecastError::UpstreamParse(e.to_string())
        })
}
