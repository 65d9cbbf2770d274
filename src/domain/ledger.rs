use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Transaction, TransactionKind};

/// Running totals derived from a ledger snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    /// income - expense
    pub balance: Decimal,
}

/// Which transactions a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl TransactionFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionFilter::All => "all",
            TransactionFilter::Only(kind) => kind.as_str(),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(TransactionFilter::All),
            other => TransactionKind::from_str(other).map(TransactionFilter::Only),
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Only(kind) => transaction.kind == *kind,
        }
    }
}

impl std::fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-category summary for one kind of transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

/// Compute income, expense and balance over a snapshot.
/// Summation is exact decimal arithmetic; an empty snapshot yields all zeros.
///
/// Sums saturate at the `Decimal` range instead of panicking. Ledger records
/// are capped at [`MAX_AMOUNT`](super::MAX_AMOUNT), so that only matters for
/// hand-built slices.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), transaction| match transaction.kind {
            TransactionKind::Income => (income.saturating_add(transaction.amount), expense),
            TransactionKind::Expense => (income, expense.saturating_add(transaction.amount)),
        },
    );

    Totals {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

/// Keep the transactions matching `filter`, preserving input order.
pub fn filter_by(transactions: &[Transaction], filter: TransactionFilter) -> Vec<&Transaction> {
    transactions.iter().filter(|t| filter.matches(t)).collect()
}

/// Group transactions of one kind by category.
/// Sorted by total (largest first), then by category name.
pub fn category_breakdown(transactions: &[Transaction], kind: TransactionKind) -> Vec<CategoryTotal> {
    let mut groups: HashMap<&str, (Decimal, usize)> = HashMap::new();

    for transaction in transactions.iter().filter(|t| t.kind == kind) {
        let entry = groups
            .entry(transaction.category.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(transaction.amount);
        entry.1 += 1;
    }

    let mut breakdown: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    breakdown
}
