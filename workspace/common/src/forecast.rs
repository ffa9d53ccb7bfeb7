use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dates::parse_datetime;

/// Horizon used when a prediction request does not name one.
pub const DEFAULT_PREDICTION_MONTHS: u32 = 3;

fn default_months() -> u32 {
    DEFAULT_PREDICTION_MONTHS
}

/// Request body for `POST /api/prediction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct PredictionRequest {
    /// Number of months to forecast (default: 3)
    #[serde(default = "default_months")]
    #[validate(range(min = 1))]
    pub months: u32,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            months: DEFAULT_PREDICTION_MONTHS,
        }
    }
}

/// A projected end-of-month balance.
///
/// The date is kept as the text the forecast source produced. Locally
/// generated points always use `YYYY-MM-DD`; upstream replies are passed
/// through as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Projection date, normally YYYY-MM-DD
    pub date: String,
    /// Projected balance on that date
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub predicted_balance: Decimal,
}

impl ForecastPoint {
    pub fn new(date: impl Into<String>, predicted_balance: Decimal) -> Self {
        Self {
            date: date.into(),
            predicted_balance,
        }
    }

    /// Point dated `date`, written as `YYYY-MM-DD`.
    pub fn on(date: NaiveDate, predicted_balance: Decimal) -> Self {
        Self::new(date.format("%Y-%m-%d").to_string(), predicted_balance)
    }

    /// Best-effort reading of `date`: any layout the dataset accepts, or a
    /// bare `YYYY-MM` taken as the first of that month.
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        parse_datetime(&self.date).or_else(|| {
            NaiveDate::parse_from_str(&format!("{}-01", self.date.trim()), "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
    }
}

/// Object the completion service is asked to produce. The API flattens it to
/// the bare `predictions` array before answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    pub predictions: Vec<ForecastPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_prediction_request_defaults_to_three_months() {
        let request: PredictionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.months, 3);
        assert_eq!(request, PredictionRequest::default());
    }

    #[test]
    fn test_prediction_request_validation() {
        assert!(PredictionRequest { months: 1 }.validate().is_ok());
        assert!(PredictionRequest { months: 0 }.validate().is_err());

        let large: PredictionRequest = serde_json::from_str(r#"{"months":3000000000}"#).unwrap();
        assert_eq!(large.months, 3_000_000_000);
        assert!(large.validate().is_ok());
    }

    #[test]
    fn test_forecast_point_wire_format() {
        let point = ForecastPoint::on(
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            Decimal::from_str("1200.5").unwrap(),
        );
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json, serde_json::json!({ "date": "2024-02-29", "predictedBalance": 1200.5 }));
    }

    #[test]
    fn test_prediction_response_parses_upstream_shape() {
        let reply = r#"{"predictions":[{"date":"2024-02-29","predictedBalance":1200.5},{"date":"2024-03-31","predictedBalance":-15}]}"#;
        let response: PredictionResponse = serde_json::from_str(reply).unwrap();
        assert_eq!(response.predictions.len(), 2);
        assert_eq!(response.predictions[1].predicted_balance, Decimal::from(-15));
    }

    #[test]
    fn test_upstream_dates_are_kept_verbatim() {
        let reply = r#"{"predictions":[{"date":"2024-02-29T00:00:00","predictedBalance":1},{"date":"2024-02","predictedBalance":2}]}"#;
        let response: PredictionResponse = serde_json::from_str(reply).unwrap();
        assert_eq!(response.predictions[0].date, "2024-02-29T00:00:00");
        assert_eq!(response.predictions[1].date, "2024-02");

        let back = serde_json::to_value(&response.predictions).unwrap();
        assert_eq!(back[1]["date"], "2024-02");
    }

    #[test]
    fn test_parsed_date_is_lenient() {
        let midnight = |y, m, d| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let point = |date: &str| ForecastPoint::new(date, Decimal::ZERO);

        assert_eq!(point("2024-02-29").parsed_date(), Some(midnight(2024, 2, 29)));
        assert_eq!(point("2024-02-29T00:00:00").parsed_date(), Some(midnight(2024, 2, 29)));
        assert_eq!(point("2024-02").parsed_date(), Some(midnight(2024, 2, 1)));
        assert_eq!(point("end of February").parsed_date(), None);
    }
}
