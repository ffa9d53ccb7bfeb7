use chrono::{Months, NaiveDate};
use common::ForecastPoint;
use rand::Rng;
use rust_decimal::Decimal;

use crate::error::{ForecastError, Result};

/// Forecast used when no completion service is configured: the balance moves
/// by a uniform random amount each month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomWalk {
    min_delta: i64,
    max_delta: i64,
}

impl RandomWalk {
    pub const DEFAULT_MIN_DELTA: i64 = -1000;
    pub const DEFAULT_MAX_DELTA: i64 = 2000;

    /// Monthly change drawn from `min_delta..max_delta` (upper bound exclusive).
    pub fn new(min_delta: i64, max_delta: i64) -> Result<Self> {
        if min_delta >= max_delta {
            return Err(ForecastError::InvalidWalkBounds {
                min: min_delta,
                max: max_delta,
            });
        }
        Ok(Self {
            min_delta,
            max_delta,
        })
    }

    pub fn min_delta(&self) -> i64 {
        self.min_delta
    }

    pub fn max_delta(&self) -> i64 {
        self.max_delta
    }

    /// Walks `months` steps from `start_balance`. Point `i` is dated `i` months
    /// after `anchor`, clamped to the end of shorter months.
    pub fn walk<R: Rng + ?Sized>(
        &self,
        anchor: NaiveDate,
        start_balance: Decimal,
        months: u32,
        rng: &mut R,
    ) -> Vec<ForecastPoint> {
        let mut balance = start_balance;
        (1..=months)
            .map_while(|step| anchor.checked_add_months(Months::new(step)))
            .map(|date| {
                balance += Decimal::from(rng.gen_range(self.min_delta..self.max_delta));
                ForecastPoint::on(date, balance)
            })
            .collect()
    }
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self {
            min_delta: Self::DEFAULT_MIN_DELTA,
            max_delta: Self::DEFAULT_MAX_DELTA,
        }
    }
}
