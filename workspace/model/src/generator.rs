//! Mock transaction exports for local development.

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use common::{TransactionData, TransactionEnvelope, TransactionRecord};
use rand::Rng;
use rust_decimal::Decimal;

/// Account every generated entry belongs to.
pub const ACCOUNT_NUMBER: &str = "9023053068900";

const OTHER_PAYEE_ACCOUNT_NUMBER: &str = "38-9023-0530689-01";
const TRANSFER_PAYEE: &str = "JJXEDXX";

const DESCRIPTIONS: [&str; 6] = [
    "TRANSFER FROM JJXEDXX - 01",
    "PAYMENT TO SUPPLIER ABC",
    "DIRECT DEBIT UTILITY",
    "POS PURCHASE OFFICE SUPPLIES",
    "CREDIT INTEREST",
    "TRANSFER TO SAVINGS",
];

/// Opening balance before the first generated entry.
pub fn starting_balance() -> Decimal {
    Decimal::new(1_000_000, 2)
}

/// Builds a mock export of `count` entries starting at `start`.
///
/// Entries are 0 to 3 days and 0 to 23 hours apart, each either a credit or a
/// debit of 10.00 to 5000.00, and the running balance always equals the
/// previous balance plus credit minus debit.
pub fn generate_dataset<R: Rng + ?Sized>(
    count: usize,
    start: NaiveDateTime,
    rng: &mut R,
) -> TransactionEnvelope {
    let mut current = start.with_nanosecond(0).unwrap_or(start);
    let mut balance = starting_balance();
    let mut items = Vec::with_capacity(count);

    for index in 0..count {
        current += TimeDelta::days(rng.gen_range(0..=3)) + TimeDelta::hours(rng.gen_range(0..=23));

        let amount = Decimal::new(rng.gen_range(1_000..=500_000), 2);
        let (debit_amount, credit_amount) = if rng.gen_bool(0.5) {
            balance += amount;
            (Decimal::ZERO, amount)
        } else {
            balance -= amount;
            (amount, Decimal::ZERO)
        };

        let description = DESCRIPTIONS[rng.gen_range(0..DESCRIPTIONS.len())];
        let other_payee_name = if description.contains(TRANSFER_PAYEE) {
            TRANSFER_PAYEE.to_string()
        } else {
            String::new()
        };

        items.push(TransactionRecord {
            transaction_id: (index + 1).to_string(),
            account_number: ACCOUNT_NUMBER.to_string(),
            transaction_date: current,
            debit_amount,
            credit_amount,
            balance,
            description: description.to_string(),
            transaction_code: Some(rng.gen_range(10..=99).to_string()),
            branch: Some("1".to_string()),
            operator: Some(rng.gen_range(1000..=9999).to_string()),
            effective_date: Some(current),
            cheque: Some(String::new()),
            this_payee_part: Some(String::new()),
            this_payee_code: Some(String::new()),
            this_payee_ref: Some(String::new()),
            other_payee_part: Some(String::new()),
            other_payee_code: Some(String::new()),
            other_payee_ref: Some(String::new()),
            other_payee_name: Some(other_payee_name),
            other_payee_account_number: Some(OTHER_PAYEE_ACCOUNT_NUMBER.to_string()),
            original_transaction_code: Some(String::new()),
            source_code: Some(String::new()),
            non_value_transaction_items: Vec::new(),
        });
    }

    TransactionEnvelope {
        data: TransactionData {
            more_transactions: false,
            transaction_count: items.len() as i64,
            transaction_items: items,
        },
    }
}
