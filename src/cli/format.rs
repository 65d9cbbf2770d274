use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{format_amount, Transaction, TransactionKind};

/// Format an amount as US dollars with thousands separators.
/// Example: 1234.5 -> "$1,234.50", -12 -> "-$12.00"
pub fn format_currency(amount: Decimal) -> String {
    let plain = format_amount(amount);
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (units, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    format!("{}${}.{}", sign, group_thousands(units), cents)
}

/// Signed display amount for a ledger row: "+$50.00" or "-$12.30".
pub fn format_signed(transaction: &Transaction) -> String {
    let prefix = match transaction.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };
    format!("{}{}", prefix, format_currency(transaction.amount))
}

/// Short human date, e.g. "Jan 5, 2024".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn group_thousands(units: &str) -> String {
    let len = units.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in units.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
