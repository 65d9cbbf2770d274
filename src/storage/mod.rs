//! Durable storage for the ledger.
//!
//! The ledger only needs an opaque key-value blob store: read one string
//! value at start, replace it after every change. [`codec`] owns the wire
//! format of that value.

pub mod codec;
mod file;
mod memory;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key the ledger is stored under.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// A string-valued key-value store.
///
/// `set` fully replaces whatever was stored under the key before.
pub trait BlobStore {
    /// Read the value stored under `key`, `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: BlobStore + ?Sized> BlobStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failure reported by a store that is not file based, such as an
    /// embedder's own `BlobStore` over a database or a remote service.
    #[error("Storage backend error: {0}")]
    Backend(String),
}
