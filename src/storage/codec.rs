//! Wire format of the persisted ledger.
//!
//! The stored value is a JSON array of transaction objects, newest first:
//!
//! ```json
//! [{"id":"…","description":"Coffee","amount":3.5,"kind":"expense",
//!   "category":"Food","occurredOn":"2024-01-01","createdAt":1704067200000}]
//! ```
//!
//! There is no version field. Anything that does not decode cleanly, or that
//! breaks a ledger invariant, is rejected as a whole.

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{Transaction, TransactionId, MAX_AMOUNT};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Stored ledger is not valid JSON for a transaction list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored ledger contains duplicate transaction id {0}")]
    DuplicateId(TransactionId),

    #[error("Stored transaction {id} is invalid: {reason}")]
    InvalidRecord { id: TransactionId, reason: String },
}

/// Encode a snapshot into the stored representation.
pub fn encode_transactions(transactions: &[Transaction]) -> Result<String, serde_json::Error> {
    serde_json::to_string(transactions)
}

/// Decode a stored value back into a snapshot, preserving order.
pub fn decode_transactions(raw: &str) -> Result<Vec<Transaction>, DecodeError> {
    let transactions: Vec<Transaction> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(transactions.len());
    for transaction in &transactions {
        if !seen.insert(transaction.id) {
            return Err(DecodeError::DuplicateId(transaction.id));
        }
        check_record(transaction)?;
    }

    Ok(transactions)
}

fn check_record(transaction: &Transaction) -> Result<(), DecodeError> {
    let reason = if transaction.amount <= Decimal::ZERO {
        "amount must be positive"
    } else if transaction.amount > MAX_AMOUNT {
        "amount exceeds the maximum"
    } else if transaction.description.trim().is_empty() {
        "description is empty"
    } else if transaction.category.trim().is_empty() {
        "category is empty"
    } else {
        return Ok(());
    };

    Err(DecodeError::InvalidRecord {
        id: transaction.id,
        reason: reason.to_string(),
    })
}
