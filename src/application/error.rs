use thiserror::Error;

use crate::domain::ValidationError;
use crate::storage::codec::DecodeError;
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// The input was rejected; the ledger was not touched.
    #[error("Invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    /// The in-memory ledger changed but could not be written to storage.
    /// Memory stays authoritative until the next successful write.
    #[error("Ledger changed but could not be saved: {0}")]
    Persistence(#[from] StoreError),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, LedgerError::Persistence(_))
    }
}

/// Why the ledger started empty even though storage may hold data.
#[derive(Error, Debug)]
pub enum LoadIssue {
    #[error("Could not read stored ledger, starting empty: {0}")]
    Unreadable(#[source] StoreError),

    #[error("Stored ledger is malformed, starting empty: {0}")]
    Malformed(#[source] DecodeError),
}
