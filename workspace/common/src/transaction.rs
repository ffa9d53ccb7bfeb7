use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dates;

/// Top-level shape of the transaction dataset and of `GET /api/transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransactionEnvelope {
    pub data: TransactionData,
}

/// Page of transactions as exported by the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    /// Whether the export was truncated
    #[serde(default)]
    pub more_transactions: bool,
    /// Number of transactions reported by the export
    #[serde(default)]
    pub transaction_count: i64,
    /// Ledger entries, in no guaranteed order
    pub transaction_items: Vec<TransactionRecord>,
}

/// A historical ledger entry. Records are read-only; the running `balance`
/// is expected to follow `previous + credit_amount - debit_amount` but that is
/// a property of the source data, not something checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(deserialize_with = "dates::deserialize_datetime")]
    pub transaction_date: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub debit_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub credit_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub balance: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub transaction_code: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default, deserialize_with = "dates::deserialize_optional_datetime")]
    pub effective_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub cheque: Option<String>,
    #[serde(default)]
    pub this_payee_part: Option<String>,
    #[serde(default)]
    pub this_payee_code: Option<String>,
    #[serde(default)]
    pub this_payee_ref: Option<String>,
    #[serde(default)]
    pub other_payee_part: Option<String>,
    #[serde(default)]
    pub other_payee_code: Option<String>,
    #[serde(default)]
    pub other_payee_ref: Option<String>,
    #[serde(default)]
    pub other_payee_name: Option<String>,
    #[serde(default)]
    pub other_payee_account_number: Option<String>,
    /// Spelled the way the bank export spells it.
    #[serde(default, rename = "originialTransactionCode")]
    pub original_transaction_code: Option<String>,
    #[serde(default)]
    pub source_code: Option<String>,
    #[serde(default)]
    pub non_value_transaction_items: Vec<NonValueTransactionItem>,
}

impl TransactionRecord {
    /// Signed movement of this entry: credits positive, debits negative.
    pub fn net_amount(&self) -> Decimal {
        self.credit_amount - self.debit_amount
    }
}

/// Informational sub-entry attached to a transaction; carries no amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonValueTransactionItem {
    #[serde(default)]
    pub non_value_transaction_id: Option<String>,
    #[serde(default)]
    pub non_value_transaction_description: Option<String>,
    #[serde(default)]
    pub non_value_transaction_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    const SAMPLE: &str = r#"{
        "data": {
            "moreTransactions": false,
            "transactionCount": 1,
            "transactionItems": [
                {
                    "transactionId": "1",
                    "accountNumber": "9023053068900",
                    "transactionDate": "2024-01-31T13:00:00",
                    "debitAmount": 0,
                    "creditAmount": 250.75,
                    "balance": 1000.5,
                    "description": "CREDIT INTEREST",
                    "transactionCode": "42",
                    "branch": "1",
                    "operator": "1234",
                    "effectiveDate": "2024-01-31T13:00:00",
                    "cheque": "",
                    "originialTransactionCode": "7",
                    "nonValueTransactionItems": [
                        { "nonValueTransactionId": "n1", "nonValueTransactionDescription": "memo" }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_deserialize_dataset() {
        let envelope: TransactionEnvelope = serde_json::from_str(SAMPLE).unwrap();
        assert!(!envelope.data.more_transactions);
        assert_eq!(envelope.data.transaction_count, 1);

        let record = &envelope.data.transaction_items[0];
        assert_eq!(record.transaction_id, "1");
        assert_eq!(
            record.transaction_date,
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(13, 0, 0).unwrap()
        );
        assert_eq!(record.debit_amount, Decimal::ZERO);
        assert_eq!(record.credit_amount, Decimal::from_str("250.75").unwrap());
        assert_eq!(record.balance, Decimal::from_str("1000.5").unwrap());
        assert_eq!(record.original_transaction_code.as_deref(), Some("7"));
        assert_eq!(record.cheque.as_deref(), Some(""));
        assert_eq!(record.other_payee_name, None);
        assert_eq!(record.non_value_transaction_items.len(), 1);
        assert_eq!(record.net_amount(), Decimal::from_str("250.75").unwrap());
    }

    #[test]
    fn test_serialize_uses_dataset_field_names() {
        let envelope: TransactionEnvelope = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_value(&envelope).unwrap();
        let item = &json["data"]["transactionItems"][0];

        assert_eq!(item["transactionDate"], "2024-01-31T13:00:00");
        assert_eq!(item["balance"], 1000.5);
        assert_eq!(item["creditAmount"], 250.75);
        assert_eq!(item["originialTransactionCode"], "7");
        assert!(item.get("originalTransactionCode").is_none());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{ "data": { "transactionItems": [ { "transactionDate": "2024-01-31" } ] } }"#;
        assert!(serde_json::from_str::<TransactionEnvelope>(json).is_err());
    }

    #[test]
    fn test_missing_items_is_rejected() {
        let json = r#"{ "data": { "moreTransactions": false, "transactionCount": 0 } }"#;
        assert!(serde_json::from_str::<TransactionEnvelope>(json).is_err());
    }

    #[test]
    fn test_amounts_accept_strings() {
        let json = r#"{
            "transactionDate": "2024-01-31",
            "debitAmount": "12.30",
            "creditAmount": "0",
            "balance": "987.70"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.debit_amount, Decimal::from_str("12.30").unwrap());
        assert_eq!(record.net_amount(), Decimal::from_str("-12.30").unwrap());
    }
}
