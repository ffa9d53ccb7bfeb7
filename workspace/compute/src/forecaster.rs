use std::fmt;
use std::sync::Arc;

use common::{ForecastPoint, TransactionRecord};
use rand::Rng;
use tracing::{debug, error, info, instrument, trace};

use crate::completion::{CompletionConstraints, CompletionService};
use crate::error::{ForecastError, Result};
use crate::prompt::{build_prompt, parse_reply, prediction_schema};
use crate::random_walk::RandomWalk;

/// Where forecasts come from.
#[derive(Clone)]
pub enum ForecastBackend {
    /// Delegate to a text-completion service.
    ExternalService(Arc<dyn CompletionService>),
    /// No service configured; generate a random walk from the latest balance.
    NoService(RandomWalk),
}

impl ForecastBackend {
    /// Label reported by the health endpoint.
    pub fn label(&self) -> &'static str {
        match self {
            ForecastBackend::ExternalService(_) => "external-service",
            ForecastBackend::NoService(_) => "random-walk",
        }
    }
}

impl fmt::Debug for ForecastBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastBackend::ExternalService(service) => {
                f.debug_tuple("ExternalService").field(&service.name()).finish()
            }
            ForecastBackend::NoService(walk) => f.debug_tuple("NoService").field(walk).finish(),
        }
    }
}

/// Produces month-by-month balance forecasts from a transaction history.
#[derive(Debug, Clone)]
pub struct Forecaster {
    backend: ForecastBackend,
    constraints: CompletionConstraints,
}

impl Forecaster {
    /// Creates a forecaster that asks external services for schema-constrained JSON.
    pub fn new(backend: ForecastBackend) -> Self {
        let constraints = CompletionConstraints {
            response_schema: Some(prediction_schema()),
            ..CompletionConstraints::default()
        };
        Self {
            backend,
            constraints,
        }
    }

    pub fn backend(&self) -> &ForecastBackend {
        &self.backend
    }

    pub fn constraints(&self) -> &CompletionConstraints {
        &self.constraints
    }

    /// Forecasts the balance for the next `months` months.
    ///
    /// With an external service the predictions are returned exactly as the
    /// service produced them. Without one, point `i` is dated `i` months after
    /// the latest transaction and starts from that transaction's balance.
    #[instrument(skip(self, history), fields(backend = self.backend.label(), history_len = history.len()))]
    pub async fn forecast(
        &self,
        history: &[TransactionRecord],
        months: u32,
    ) -> Result<Vec<ForecastPoint>> {
        trace!("Starting forecast");
        if months == 0 {
            return Err(ForecastError::InvalidHorizon);
        }
        if history.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }

        let predictions = match &self.backend {
            ForecastBackend::ExternalService(service) => {
                let prompt = build_prompt(history, months)?;
                debug!("Sending {} character prompt to {}", prompt.len(), service.name());

                let reply = service
                    .complete(&prompt, &self.constraints)
                    .await
                    .map_err(|e| {
                        error!("Completion service {} failed: {}", service.name(), e);
                        ForecastError::from(e)
                    })?;
                parse_reply(&reply)?
            }
            ForecastBackend::NoService(walk) => walk_from_latest(walk, history, months, &mut rand::thread_rng())?,
        };

        info!(
            "Forecast produced {} predictions for {} requested months",
            predictions.len(),
            months
        );
        Ok(predictions)
    }
}

fn walk_from_latest<R: Rng + ?Sized>(
    walk: &RandomWalk,
    history: &[TransactionRecord],
    months: u32,
    rng: &mut R,
) -> Result<Vec<ForecastPoint>> {
    let latest = history
        .iter()
        .max_by_key(|record| record.transaction_date)
        .ok_or(ForecastError::EmptyHistory)?;
    debug!(
        "Random walk anchored at {} with balance {}",
        latest.transaction_date, latest.balance
    );
    Ok(walk.walk(latest.transaction_date.date(), latest.balance, months, rng))
}
