//! Access to the historical transaction dataset.
//!
//! The dataset is a static JSON export read fresh on every call; nothing here
//! caches or mutates it. `generator` produces mock exports for local runs.

pub mod error;
pub mod generator;
pub mod store;

pub use error::{Result, StoreError};
pub use generator::generate_dataset;
pub use store::{JsonFileStore, TransactionStore};
