//! Chart shaping for the dashboard.
//!
//! The dashboard keeps the whole history in memory and re-derives what it
//! plots on every range change: a filtered history window anchored on the
//! latest transaction (not on the wall clock) and a prediction series that
//! starts at the last plotted historical point so the two lines connect.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDateTime};
use rust_decimal::Decimal;

use crate::{ForecastPoint, TransactionRecord};

/// How much history the chart shows, counted back from the dataset anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryRange {
    Months(u32),
    All,
}

impl Default for HistoryRange {
    fn default() -> Self {
        HistoryRange::Months(6)
    }
}

impl HistoryRange {
    /// Choices offered by the history selector.
    pub const OPTIONS: [HistoryRange; 4] = [
        HistoryRange::Months(3),
        HistoryRange::Months(6),
        HistoryRange::Months(12),
        HistoryRange::All,
    ];

    pub fn label(&self) -> String {
        match self {
            HistoryRange::Months(months) => format!("Last {} Months", months),
            HistoryRange::All => "All Time".to_string(),
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryRange::Months(months) => write!(f, "{}", months),
            HistoryRange::All => f.write_str("all"),
        }
    }
}

impl FromStr for HistoryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(HistoryRange::All);
        }
        match s.parse::<u32>() {
            Ok(months) if months > 0 => Ok(HistoryRange::Months(months)),
            _ => Err(format!("invalid history range `{}`", s)),
        }
    }
}

/// Horizons offered by the prediction selector, in months.
pub const PREDICTION_RANGE_OPTIONS: [u32; 4] = [3, 6, 9, 12];

/// One `(x, y)` point of a chart line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: NaiveDateTime,
    pub y: Decimal,
}

impl ChartPoint {
    pub fn new(x: NaiveDateTime, y: Decimal) -> Self {
        Self { x, y }
    }
}

/// Sorts records oldest first. The sort is stable, so entries sharing a
/// timestamp keep their dataset order.
pub fn sort_history(records: &mut [TransactionRecord]) {
    records.sort_by_key(|record| record.transaction_date);
}

/// The most recent transaction date, or `None` for an empty history.
pub fn dataset_anchor(records: &[TransactionRecord]) -> Option<NaiveDateTime> {
    records.iter().map(|record| record.transaction_date).max()
}

/// Restricts `records` to the window selected by `range`.
///
/// `HistoryRange::All` returns the input untouched. `HistoryRange::Months(n)`
/// keeps every record dated on or after `anchor - n months`; the cutoff is
/// inclusive and clamps to the end of shorter months. Order is preserved.
pub fn filter_history(records: &[TransactionRecord], range: HistoryRange) -> Vec<TransactionRecord> {
    let months = match range {
        HistoryRange::All => return records.to_vec(),
        HistoryRange::Months(months) => months,
    };

    let Some(anchor) = dataset_anchor(records) else {
        return Vec::new();
    };
    let cutoff = anchor
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDateTime::MIN);

    records
        .iter()
        .filter(|record| record.transaction_date >= cutoff)
        .cloned()
        .collect()
}

/// Historical balance line.
pub fn history_series(filtered: &[TransactionRecord]) -> Vec<ChartPoint> {
    filtered
        .iter()
        .map(|record| ChartPoint::new(record.transaction_date, record.balance))
        .collect()
}

/// Predicted balance line.
///
/// Starts with the last displayed historical point, then every prediction
/// dated strictly after it, oldest first. Without history every prediction is
/// plotted. Predictions whose date cannot be read are left off the chart.
pub fn prediction_series(filtered: &[TransactionRecord], predictions: &[ForecastPoint]) -> Vec<ChartPoint> {
    let last = filtered.last();

    let mut upcoming: Vec<ChartPoint> = predictions
        .iter()
        .filter_map(|point| {
            point
                .parsed_date()
                .map(|date| ChartPoint::new(date, point.predicted_balance))
        })
        .filter(|point| match last {
            Some(record) => point.x > record.transaction_date,
            None => true,
        })
        .collect();
    upcoming.sort_by_key(|point| point.x);

    let mut series = Vec::with_capacity(upcoming.len() + 1);
    if let Some(record) = last {
        series.push(ChartPoint::new(record.transaction_date, record.balance));
    }
    series.extend(upcoming);
    series
}

/// Whether the dashboard has asked for a forecast yet.
///
/// The predict button always fetches. A later horizon change re-fetches only
/// once the button has been pressed at least once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForecastTrigger {
    requested: bool,
}

impl ForecastTrigger {
    /// State after the predict button was pressed.
    pub fn pressed(self) -> Self {
        Self { requested: true }
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Horizon to fetch after the prediction selector changed, if any.
    pub fn on_horizon_change(&self, months: u32) -> Option<u32> {
        self.requested.then_some(months)
    }
}
