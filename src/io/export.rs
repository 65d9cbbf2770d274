use std::io::Write;

use anyhow::Result;

use crate::domain::{format_amount, Transaction};

/// Output format for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    /// Same shape as the stored ledger
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Write `transactions` in the given format. Returns the number of records written.
pub fn export_transactions<W: Write>(
    transactions: &[&Transaction],
    format: ExportFormat,
    writer: W,
) -> Result<usize> {
    match format {
        ExportFormat::Csv => export_csv(transactions, writer),
        ExportFormat::Json => export_json(transactions, writer),
    }
}

/// Export transactions to CSV, one row per record in ledger order
pub fn export_csv<W: Write>(transactions: &[&Transaction], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "id",
        "occurred_on",
        "kind",
        "category",
        "description",
        "amount",
        "created_at",
    ])?;

    for transaction in transactions {
        csv_writer.write_record(&[
            transaction.id.to_string(),
            transaction.occurred_on.format("%Y-%m-%d").to_string(),
            transaction.kind.to_string(),
            transaction.category.clone(),
            transaction.description.clone(),
            format_amount(transaction.amount),
            transaction.created_at.to_rfc3339(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(transactions.len())
}

/// Export transactions as a pretty-printed JSON array
pub fn export_json<W: Write>(transactions: &[&Transaction], mut writer: W) -> Result<usize> {
    serde_json::to_writer_pretty(&mut writer, transactions)?;
    writeln!(writer)?;
    Ok(transactions.len())
}
