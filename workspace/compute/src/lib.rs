pub mod completion;
pub mod error;
pub mod forecaster;
pub mod prompt;
pub mod random_walk;

pub use completion::{
    AzureOpenAiClient, CannedCompletion, CompletionConstraints, CompletionError, CompletionService,
    ResponseSchema,
};
pub use error::{ForecastError, Result};
pub use forecaster::{ForecastBackend, Forecaster};
pub use random_walk::RandomWalk;

/// Returns the forecaster used when nothing is configured: a random walk with
/// the default monthly bounds.
pub fn default_forecaster() -> Forecaster {
    Forecaster::new(ForecastBackend::NoService(RandomWalk::default()))
}
