use chrono::{DateTime, Duration, SubsecRound, Utc};
use log::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    compute_totals, filter_by, NewTransaction, Totals, Transaction, TransactionFilter,
    TransactionId,
};
use crate::storage::codec::{decode_transactions, encode_transactions};
use crate::storage::{BlobStore, StoreError, TRANSACTIONS_KEY};

use super::{LedgerError, LoadIssue};

/// The single source of truth for the transaction list.
///
/// Holds the records newest-first and writes the whole list through to the
/// blob store after every successful `add` or `remove`.
pub struct LedgerStore<S: BlobStore> {
    store: S,
    transactions: Vec<Transaction>,
    /// Highest `created_at` handed out or loaded so far
    last_created_at: Option<DateTime<Utc>>,
    load_issue: Option<LoadIssue>,
}

impl<S: BlobStore> LedgerStore<S> {
    /// Load the ledger from `store`. Call once at startup.
    ///
    /// Never fails: a missing value gives an empty ledger, and an unreadable
    /// or malformed one gives an empty ledger plus a [`LoadIssue`] the caller
    /// can report via [`LedgerStore::load_issue`].
    pub fn initialize(store: S) -> Self {
        let (transactions, load_issue) = match store.get(TRANSACTIONS_KEY) {
            Ok(None) => {
                info!("event=ledger_load module=ledger status=empty reason=absent");
                (Vec::new(), None)
            }
            Ok(Some(raw)) => match decode_transactions(&raw) {
                Ok(transactions) => {
                    info!(
                        "event=ledger_load module=ledger status=ok count={}",
                        transactions.len()
                    );
                    (transactions, None)
                }
                Err(err) => {
                    warn!(
                        "event=ledger_load module=ledger status=malformed error={}",
                        err
                    );
                    (Vec::new(), Some(LoadIssue::Malformed(err)))
                }
            },
            Err(err) => {
                warn!(
                    "event=ledger_load module=ledger status=unreadable error={}",
                    err
                );
                (Vec::new(), Some(LoadIssue::Unreadable(err)))
            }
        };

        let last_created_at = transactions.iter().map(|t| t.created_at).max();

        Self {
            store,
            transactions,
            last_created_at,
            load_issue,
        }
    }

    /// Validate and record a new transaction at the front of the ledger.
    ///
    /// Validation failures leave the ledger untouched. A storage failure is
    /// reported after the record has been added in memory.
    pub fn add(&mut self, input: NewTransaction) -> Result<Transaction, LedgerError> {
        input.validate()?;

        let transaction = input.into_transaction(self.next_id(), self.next_created_at());
        self.last_created_at = Some(transaction.created_at);
        self.transactions.insert(0, transaction.clone());

        info!(
            "event=transaction_add module=ledger status=ok id={} kind={} count={}",
            transaction.id,
            transaction.kind,
            self.transactions.len()
        );

        self.persist()?;
        Ok(transaction)
    }

    /// Remove the transaction with `id`.
    ///
    /// Returns `Ok(false)` without touching storage when no such record exists.
    pub fn remove(&mut self, id: TransactionId) -> Result<bool, LedgerError> {
        let Some(position) = self.transactions.iter().position(|t| t.id == id) else {
            info!(
                "event=transaction_remove module=ledger status=not_found id={}",
                id
            );
            return Ok(false);
        };

        self.transactions.remove(position);
        info!(
            "event=transaction_remove module=ledger status=ok id={} count={}",
            id,
            self.transactions.len()
        );

        self.persist()?;
        Ok(true)
    }

    /// Current records, newest first.
    pub fn snapshot(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Totals over the current snapshot.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.transactions)
    }

    /// Records of the current snapshot matching `filter`, newest first.
    pub fn filtered(&self, filter: TransactionFilter) -> Vec<&Transaction> {
        filter_by(&self.transactions, filter)
    }

    /// Problem encountered while loading, if the ledger had to start empty.
    pub fn load_issue(&self) -> Option<&LoadIssue> {
        self.load_issue.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let result = encode_transactions(&self.transactions)
            .map_err(StoreError::from)
            .and_then(|encoded| self.store.set(TRANSACTIONS_KEY, &encoded));

        if let Err(err) = &result {
            error!(
                "event=ledger_persist module=ledger status=error count={} error={}",
                self.transactions.len(),
                err
            );
        }
        result
    }

    fn next_id(&self) -> TransactionId {
        // v4 collisions are practically impossible, but uniqueness is a ledger invariant
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    /// Millisecond-precision timestamp strictly after every existing record.
    fn next_created_at(&self) -> DateTime<Utc> {
        let now = Utc::now().trunc_subsecs(3);
        match self.last_created_at {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        }
    }
}
