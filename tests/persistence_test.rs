mod common;

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally::storage::codec::{decode_transactions, encode_transactions};
use tally::storage::TRANSACTIONS_KEY;
use tally::{
    BlobStore, FileStore, LedgerError, LedgerStore, LoadIssue, MemoryStore, ValidationError,
    MAX_AMOUNT,
};

use common::{expense, file_ledger, income, FailingStore};

#[test]
fn test_every_mutation_is_written_through() -> Result<()> {
    let mut ledger = LedgerStore::initialize(MemoryStore::new());

    let lunch = ledger.add(expense("Lunch", dec!(12.40), "Food"))?;
    let stored = decode_transactions(ledger.store().raw(TRANSACTIONS_KEY).unwrap())?;
    assert_eq!(stored.as_slice(), ledger.snapshot());

    ledger.add(income("Paycheck", dec!(2500), "Salary"))?;
    let stored = decode_transactions(ledger.store().raw(TRANSACTIONS_KEY).unwrap())?;
    assert_eq!(stored.as_slice(), ledger.snapshot());

    ledger.remove(lunch.id)?;
    let stored = decode_transactions(ledger.store().raw(TRANSACTIONS_KEY).unwrap())?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored.as_slice(), ledger.snapshot());

    Ok(())
}

#[test]
fn test_reload_reproduces_snapshot() -> Result<()> {
    let mut ledger = LedgerStore::initialize(MemoryStore::new());
    ledger.add(income("Dividend", dec!(100.50), "Investment"))?;
    ledger.add(expense("Pharmacy", dec!(30.25), "Health"))?;
    ledger.add(expense("Train", dec!(7.80), "Transport"))?;
    let snapshot = ledger.snapshot().to_vec();

    let reopened = LedgerStore::initialize(ledger.into_store());

    assert!(reopened.load_issue().is_none());
    assert_eq!(reopened.snapshot(), snapshot.as_slice());
    assert_eq!(reopened.totals().balance, dec!(62.45));

    Ok(())
}

#[test]
fn test_file_store_survives_restart() -> Result<()> {
    let (mut ledger, temp_dir) = file_ledger()?;
    let salary = ledger.add(income("Salary", dec!(3200), "Salary"))?;
    ledger.add(expense("Groceries", dec!(84.17), "Food"))?;
    let snapshot = ledger.snapshot().to_vec();
    drop(ledger);

    let reopened = LedgerStore::initialize(FileStore::open(temp_dir.path())?);

    assert_eq!(reopened.snapshot(), snapshot.as_slice());
    assert_eq!(reopened.snapshot()[1].id, salary.id);
    assert!(temp_dir.path().join("transactions.json").is_file());

    Ok(())
}

#[test]
fn test_absent_value_gives_empty_ledger() {
    let ledger = LedgerStore::initialize(MemoryStore::new());

    assert!(ledger.is_empty());
    assert!(ledger.load_issue().is_none());
}

#[test]
fn test_malformed_value_gives_empty_ledger() {
    for raw in [
        "",
        "not json",
        "{\"transactions\": []}",
        "[{\"id\": 1700000000000, \"description\": \"legacy\"}]",
        "[{\"id\":\"6f1c1d2e-8a43-4a5e-9d7e-0c2b7f6a1e11\",\"description\":\"Coffee\",\
          \"amount\":-3.5,\"kind\":\"expense\",\"category\":\"Food\",\
          \"occurredOn\":\"2024-01-01\",\"createdAt\":1704067200123}]",
    ] {
        let ledger = LedgerStore::initialize(MemoryStore::with_value(TRANSACTIONS_KEY, raw));

        assert!(ledger.is_empty(), "expected empty ledger for {:?}", raw);
        assert!(matches!(ledger.load_issue(), Some(LoadIssue::Malformed(_))));
    }
}

#[test]
fn test_unreadable_store_gives_empty_ledger() {
    let ledger = LedgerStore::initialize(FailingStore::failing_reads());

    assert!(ledger.is_empty());
    assert!(matches!(ledger.load_issue(), Some(LoadIssue::Unreadable(_))));
}

#[test]
fn test_malformed_value_is_replaced_on_next_write() -> Result<()> {
    let mut ledger =
        LedgerStore::initialize(MemoryStore::with_value(TRANSACTIONS_KEY, "corrupted"));
    ledger.add(expense("Fresh start", dec!(1), "Other"))?;

    let stored = decode_transactions(ledger.store().raw(TRANSACTIONS_KEY).unwrap())?;
    assert_eq!(stored.len(), 1);

    Ok(())
}

#[test]
fn test_write_failure_is_surfaced_but_memory_keeps_change() {
    let mut ledger = LedgerStore::initialize(FailingStore::failing_writes());

    let result = ledger.add(expense("Taxi", dec!(18), "Transport"));

    assert!(matches!(result, Err(LedgerError::Persistence(_))));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.snapshot()[0].description, "Taxi");
    assert!(ledger.store().inner.raw(TRANSACTIONS_KEY).is_none());
}

#[test]
fn test_remove_write_failure_is_surfaced() -> Result<()> {
    let mut ledger = LedgerStore::initialize(FailingStore::default());
    let taxi = ledger.add(expense("Taxi", dec!(18), "Transport"))?;

    let mut store = ledger.into_store();
    store.fail_writes = true;
    let mut ledger = LedgerStore::initialize(store);

    let result = ledger.remove(taxi.id);

    assert!(result.as_ref().is_err_and(|err| err.is_persistence()));
    assert!(ledger.is_empty());
    // Storage still holds the pre-removal state
    let stored = decode_transactions(
        ledger
            .store()
            .get(TRANSACTIONS_KEY)?
            .as_deref()
            .unwrap_or("[]"),
    )?;
    assert_eq!(stored.len(), 1);

    Ok(())
}

#[test]
fn test_validation_failure_does_not_write() {
    let mut ledger = LedgerStore::initialize(MemoryStore::new());

    let result = ledger.add(expense("", dec!(5), "Food"));

    assert!(result.is_err());
    assert!(ledger.store().raw(TRANSACTIONS_KEY).is_none());
}

#[test]
fn test_encode_decode_roundtrip_of_snapshot() -> Result<()> {
    let mut ledger = LedgerStore::initialize(MemoryStore::new());
    ledger.add(income("Bonus", dec!(1234.56), "Salary"))?;
    ledger.add(expense("Cinema", dec!(11), "Entertainment"))?;

    let encoded = encode_transactions(ledger.snapshot())?;
    let decoded = decode_transactions(&encoded)?;

    assert_eq!(decoded.as_slice(), ledger.snapshot());

    Ok(())
}

#[test]
fn test_rejected_huge_amount_leaves_stored_ledger_intact() -> Result<()> {
    let mut ledger = LedgerStore::initialize(MemoryStore::new());
    ledger.add(expense("Rent", dec!(700), "Bills"))?;
    let stored_before = ledger.store().raw(TRANSACTIONS_KEY).map(str::to_owned);

    let result = ledger.add(income("Lottery", Decimal::MAX, "Gift"));

    assert!(matches!(
        result,
        Err(LedgerError::Validation(ValidationError::AmountTooLarge(_)))
    ));
    assert_eq!(ledger.store().raw(TRANSACTIONS_KEY).map(str::to_owned), stored_before);

    let reopened = LedgerStore::initialize(ledger.into_store());
    assert!(reopened.load_issue().is_none());
    assert_eq!(reopened.len(), 1);

    Ok(())
}

#[test]
fn test_extreme_accepted_amounts_reload_unchanged() -> Result<()> {
    let (mut ledger, temp_dir) = file_ledger()?;
    ledger.add(income("Windfall", MAX_AMOUNT, "Gift"))?;
    ledger.add(expense("Gum", dec!(0.01), "Food"))?;
    ledger.add(expense("Laptop", dec!(123456789012.34), "Shopping"))?;
    let snapshot = ledger.snapshot().to_vec();
    drop(ledger);

    let reopened = LedgerStore::initialize(FileStore::open(temp_dir.path())?);

    assert!(reopened.load_issue().is_none());
    assert_eq!(reopened.snapshot(), snapshot.as_slice());
    assert_eq!(reopened.snapshot()[2].amount, MAX_AMOUNT);
    assert_eq!(reopened.totals().balance, dec!(876543210987.64));

    Ok(())
}

#[test]
fn test_file_write_failure_leaves_no_stray_files() -> Result<()> {
    let (mut ledger, temp_dir) = file_ledger()?;
    std::fs::create_dir(temp_dir.path().join("transactions.json"))?;

    let result = ledger.add(expense("Lunch", dec!(12.40), "Food"));

    assert!(result.as_ref().is_err_and(|err| err.is_persistence()));
    let names: Vec<String> = std::fs::read_dir(temp_dir.path())?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    assert_eq!(names, vec!["transactions.json".to_string()]);

    Ok(())
}
