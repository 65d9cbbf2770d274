// Application layer - the ledger store that owns the transaction list and
// keeps durable storage in sync with it.

pub mod error;
mod store;

pub use error::*;
pub use store::*;
