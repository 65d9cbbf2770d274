// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally::{
    BlobStore, FileStore, LedgerStore, MemoryStore, NewTransaction, StoreError, TransactionKind,
};
use tempfile::TempDir;

/// Helper to create a ledger over a fresh in-memory store
pub fn memory_ledger() -> LedgerStore<MemoryStore> {
    LedgerStore::initialize(MemoryStore::new())
}

/// Helper to create a ledger over a temporary data directory
pub fn file_ledger() -> Result<(LedgerStore<FileStore>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = FileStore::open(temp_dir.path())?;
    Ok((LedgerStore::initialize(store), temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

pub fn expense(description: &str, amount: Decimal, category: &str) -> NewTransaction {
    NewTransaction::new(
        description,
        amount,
        TransactionKind::Expense,
        category,
        parse_date("2024-01-01"),
    )
}

pub fn income(description: &str, amount: Decimal, category: &str) -> NewTransaction {
    NewTransaction::new(
        description,
        amount,
        TransactionKind::Income,
        category,
        parse_date("2024-01-01"),
    )
}

/// Blob store whose reads and/or writes always fail, like a full or
/// revoked storage quota.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl FailingStore {
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }
}

impl BlobStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Backend("read refused".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Backend("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }
}
