//! Implements `CompletionService` with a fixed answer.
//!
//! Note: this is compiled even in the production build so the whole server can
//! be driven end to end, including the external-service path, without a model.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::{CompletionConstraints, CompletionError, CompletionService};

#[derive(Debug, Clone)]
enum CannedReply {
    Text(String),
    Failure { status: u16, body: String },
}

/// A completion service that answers every prompt the same way and keeps the
/// prompts it was sent.
#[derive(Debug)]
pub struct CannedCompletion {
    reply: CannedReply,
    prompts: Mutex<Vec<String>>,
}

impl CannedCompletion {
    /// Answers every prompt with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: CannedReply::Text(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call as if the service had answered with `status`.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: CannedReply::Failure {
                status,
                body: body.into(),
            },
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionService for CannedCompletion {
    async fn complete(
        &self,
        prompt: &str,
        _constraints: &CompletionConstraints,
    ) -> Result<String, CompletionError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());
        debug!("Canned completion answering prompt of {} characters", prompt.len());

        match &self.reply {
            CannedReply::Text(text) => Ok(text.clone()),
            CannedReply::Failure { status, body } => Err(CompletionError::Status {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "canned"
    }
}
