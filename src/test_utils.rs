#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use compute::{CannedCompletion, CompletionService, ForecastBackend, Forecaster, RandomWalk};
    use model::JsonFileStore;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// A small export: three transactions, deliberately out of order, the
    /// latest on 2024-01-31 with a balance of 1000.
    pub const SAMPLE_DATASET: &str = r#"{
        "data": {
            "moreTransactions": false,
            "transactionCount": 3,
            "transactionItems": [
                {
                    "transactionId": "2",
                    "accountNumber": "9023053068900",
                    "transactionDate": "2024-01-31T09:00:00",
                    "debitAmount": 0,
                    "creditAmount": 250,
                    "balance": 1000,
                    "description": "CREDIT INTEREST",
                    "originialTransactionCode": "",
                    "nonValueTransactionItems": []
                },
                {
                    "transactionId": "1",
                    "accountNumber": "9023053068900",
                    "transactionDate": "2024-01-05T08:00:00",
                    "debitAmount": 0,
                    "creditAmount": 750,
                    "balance": 750,
                    "description": "TRANSFER FROM JJXEDXX - 01",
                    "otherPayeeName": "JJXEDXX"
                },
                {
                    "transactionId": "0",
                    "accountNumber": "9023053068900",
                    "transactionDate": "2023-12-20T17:45:00",
                    "debitAmount": 0,
                    "creditAmount": 0,
                    "balance": 0,
                    "description": "DIRECT DEBIT UTILITY"
                }
            ]
        }
    }"#;

    /// Canned upstream reply with one prediction.
    pub const CANNED_REPLY: &str =
        r#"{"predictions":[{"date":"2024-02-29","predictedBalance":1200.5}]}"#;

    /// Where the test dataset lives. Keep the `TempDir` alive for the test.
    pub struct TestDataset {
        pub dir: TempDir,
    }

    impl TestDataset {
        pub fn path(&self) -> std::path::PathBuf {
            self.dir.path().join("mock_transactions.json")
        }
    }

    /// Create a dataset directory, optionally writing `contents` into it.
    pub fn setup_dataset(contents: Option<&str>) -> TestDataset {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let dataset = TestDataset { dir };
        if let Some(contents) = contents {
            std::fs::write(dataset.path(), contents).expect("Failed to write dataset");
        }
        dataset
    }

    /// Create AppState for testing
    pub fn setup_test_app_state(data_file: &Path, backend: ForecastBackend) -> AppState {
        AppState {
            store: Arc::new(JsonFileStore::new(data_file)),
            forecaster: Arc::new(Forecaster::new(backend)),
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Backend that forwards prompts to `service`.
    pub fn canned_backend(service: Arc<CannedCompletion>) -> ForecastBackend {
        let service: Arc<dyn CompletionService> = service;
        ForecastBackend::ExternalService(service)
    }

    pub fn random_walk_backend() -> ForecastBackend {
        ForecastBackend::NoService(RandomWalk::default())
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app(data_file: &Path, backend: ForecastBackend) -> Router {
        create_router(setup_test_app_state(data_file, backend))
    }
}
