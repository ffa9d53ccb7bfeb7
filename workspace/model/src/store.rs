use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use common::series::sort_history;
use common::{TransactionEnvelope, TransactionRecord};
use tracing::{debug, instrument, trace, warn};

use crate::error::{Result, StoreError};

/// Read-only source of historical transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Loads the dataset as the source provides it, in source order.
    async fn load_dataset(&self) -> Result<TransactionEnvelope>;

    /// Loads the transaction history ordered by transaction date, oldest first.
    async fn load_history(&self) -> Result<Vec<TransactionRecord>> {
        let envelope = self.load_dataset().await?;
        let mut history = envelope.data.transaction_items;
        sort_history(&mut history);
        Ok(history)
    }

    /// Whether the backing dataset currently exists.
    async fn is_available(&self) -> bool;
}

/// Store backed by a JSON export on disk. The file is read on every call so
/// edits to the export show up without a restart.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `envelope` to the store's file as pretty-printed JSON.
    pub async fn save_dataset(&self, envelope: &TransactionEnvelope) -> Result<()> {
        let json = serde_json::to_string_pretty(envelope)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl TransactionStore for JsonFileStore {
    #[instrument(skip(self))]
    async fn load_dataset(&self) -> Result<TransactionEnvelope> {
        trace!("Reading transaction dataset from {}", self.path.display());
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Transaction dataset is missing");
                return Err(StoreError::DataUnavailable {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                warn!("Failed to read transaction dataset: {}", source);
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let envelope = parse_dataset(&raw)?;
        debug!(
            "Loaded {} transactions from dataset",
            envelope.data.transaction_items.len()
        );
        Ok(envelope)
    }

    async fn is_available(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}

/// Parses a dataset export. Schema mismatches become `StoreError::DataMalformed`.
pub fn parse_dataset(raw: &str) -> Result<TransactionEnvelope> {
    serde_json::from_str(raw).map_err(|e| {
        warn!("Transaction dataset is malformed: {}", e);
        StoreError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    const UNORDERED: &str = r#"{
        "data": {
            "moreTransactions": false,
            "transactionCount": 3,
            "transactionItems": [
                { "transactionId": "2", "transactionDate": "2024-02-01T09:00:00", "debitAmount": 50, "creditAmount": 0, "balance": 950, "description": "DIRECT DEBIT UTILITY" },
                { "transactionId": "3", "transactionDate": "2024-03-01T09:00:00", "debitAmount": 0, "creditAmount": 100, "balance": 1050, "description": "CREDIT INTEREST" },
                { "transactionId": "1", "transactionDate": "2024-01-01T09:00:00", "debitAmount": 0, "creditAmount": 1000, "balance": 1000, "description": "TRANSFER FROM JJXEDXX - 01" }
            ]
        }
    }"#;

    fn write_dataset(dir: &TempDir, contents: &str) -> JsonFileStore {
        let path = dir.path().join("mock_transactions.json");
        std::fs::write(&path, contents).unwrap();
        JsonFileStore::new(path)
    }

    #[tokio::test]
    async fn test_load_dataset_keeps_source_order() {
        let dir = TempDir::new().unwrap();
        let store = write_dataset(&dir, UNORDERED);

        let envelope = store.load_dataset().await.unwrap();
        let ids: Vec<&str> = envelope
            .data
            .transaction_items
            .iter()
            .map(|r| r.transaction_id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
        assert_eq!(envelope.data.transaction_count, 3);
    }

    #[tokio::test]
    async fn test_load_history_sorts_by_date() {
        let dir = TempDir::new().unwrap();
        let store = write_dataset(&dir, UNORDERED);

        let history = store.load_history().await.unwrap();
        let ids: Vec<&str> = history.iter().map(|r| r.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(history[2].balance, Decimal::from(1050));
        assert_eq!(
            history[0].transaction_date.date(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        assert!(!store.is_available().await);
        match store.load_history().await {
            Err(StoreError::DataUnavailable { path }) => assert_eq!(path, store.path()),
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let dir = TempDir::new().unwrap();
        let store = write_dataset(&dir, "{ not json");

        assert!(store.is_available().await);
        assert!(matches!(
            store.load_dataset().await,
            Err(StoreError::DataMalformed(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_items_is_malformed() {
        let dir = TempDir::new().unwrap();
        let store = write_dataset(&dir, r#"{ "data": { "transactionCount": 0 } }"#);

        match store.load_dataset().await {
            Err(StoreError::DataMalformed(message)) => {
                assert!(message.contains("transactionItems"), "{}", message)
            }
            other => panic!("expected DataMalformed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let original = parse_dataset(UNORDERED).unwrap();
        let store = JsonFileStore::new(dir.path().join("saved.json"));

        store.save_dataset(&original).await.unwrap();
        assert_eq!(store.load_dataset().await.unwrap(), original);
    }
}
