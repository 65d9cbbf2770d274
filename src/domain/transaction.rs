use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MAX_AMOUNT, MAX_AMOUNT_SCALE};

pub type TransactionId = Uuid;

const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", "Gift", "Other"];

const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, gifts, ...)
    Income,
    /// Money going out (food, bills, ...)
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    /// The fixed category vocabulary a transaction of this kind may use.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => INCOME_CATEGORIES,
            TransactionKind::Expense => EXPENSE_CATEGORIES,
        }
    }

    pub fn allows_category(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense record.
/// Records are immutable - corrections are made by removing and re-adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Always positive; direction is carried by `kind`
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    /// Calendar date the money moved in the real world
    pub occurred_on: NaiveDate,
    /// When the record was created; only used as an insertion-order signal
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the direction applied: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Caller-supplied fields for a new transaction.
/// The ledger assigns `id` and `created_at` when the record is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    pub occurred_on: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        kind: TransactionKind,
        category: impl Into<String>,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            occurred_on,
        }
    }

    pub fn income(
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        occurred_on: NaiveDate,
    ) -> Self {
        Self::new(description, amount, TransactionKind::Income, category, occurred_on)
    }

    pub fn expense(
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        occurred_on: NaiveDate,
    ) -> Self {
        Self::new(description, amount, TransactionKind::Expense, category, occurred_on)
    }

    /// Check the construction-time rules. The kind/category pairing is only
    /// enforced here, never on records read back from storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge(self.amount));
        }
        if self.amount.normalize().scale() > MAX_AMOUNT_SCALE {
            return Err(ValidationError::AmountTooPrecise(self.amount));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if !self.kind.allows_category(category) {
            return Err(ValidationError::UnknownCategory {
                kind: self.kind,
                category: category.to_string(),
            });
        }
        Ok(())
    }

    /// Turn validated input into a stored record.
    pub(crate) fn into_transaction(
        self,
        id: TransactionId,
        created_at: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id,
            description: self.description.trim().to_string(),
            amount: self.amount,
            kind: self.kind,
            category: self.category.trim().to_string(),
            occurred_on: self.occurred_on,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Amount {0} exceeds the maximum of {max}", max = MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    #[error("Amount {0} has more than {max} decimal places", max = MAX_AMOUNT_SCALE)]
    AmountTooPrecise(Decimal),

    #[error("Category '{category}' is not valid for {kind} transactions")]
    UnknownCategory {
        kind: TransactionKind,
        category: String,
    },
}
