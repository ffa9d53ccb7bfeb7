//! The text-completion capability the forecaster delegates to.
//!
//! Forecasting logic only ever sees `CompletionService`, so it can run against
//! Azure OpenAI in production and against `CannedCompletion` everywhere else.

pub mod azure;
pub mod canned;

pub use azure::AzureOpenAiClient;
pub use canned::CannedCompletion;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Failures of a single completion call.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Transport failure, including timeouts
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Completion service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered without any generated text
    #[error("Completion service returned no content")]
    EmptyReply,
}

/// JSON schema the reply must conform to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

/// Generation settings sent along with a prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionConstraints {
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature; low values keep output steady
    pub temperature: f32,
    /// Nucleus sampling cut-off
    pub top_p: f32,
    /// Structured-output schema, if the service should enforce one
    pub response_schema: Option<ResponseSchema>,
}

impl Default for CompletionConstraints {
    fn default() -> Self {
        Self {
            max_tokens: 4000,
            temperature: 0.5,
            top_p: 0.0,
            response_schema: None,
        }
    }
}

/// A text-completion service.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends `prompt` and returns the generated text.
    async fn complete(
        &self,
        prompt: &str,
        constraints: &CompletionConstraints,
    ) -> Result<String, CompletionError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
