//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the JSON the backend serves so the dashboard can
//! deserialize API responses without duplicating shapes. The `series` module
//! holds the dashboard's chart shaping, kept here so it runs natively in tests.

mod dates;
mod forecast;
pub mod series;
mod transaction;

pub use dates::parse_datetime;
pub use forecast::{ForecastPoint, PredictionRequest, PredictionResponse, DEFAULT_PREDICTION_MONTHS};
pub use series::{ChartPoint, ForecastTrigger, HistoryRange};
pub use transaction::{NonValueTransactionItem, TransactionData, TransactionEnvelope, TransactionRecord};
