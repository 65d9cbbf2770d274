mod format;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{LedgerError, LedgerStore};
use crate::config::{Config, DATA_DIR_ENV};
use crate::domain::{
    category_breakdown, compute_totals, filter_by, parse_amount, NewTransaction,
    TransactionFilter, TransactionKind,
};
use crate::io::{export_transactions, ExportFormat};
use crate::logging::init_logging;
use crate::storage::{BlobStore, FileStore};

pub use format::*;

/// Tally - Income & Expense Tracker
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Take control of your finances: track income and expenses locally")]
#[command(version)]
pub struct Cli {
    /// Directory where the ledger is stored
    #[arg(long, env = DATA_DIR_ENV, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new income or expense
    Add {
        /// Amount (e.g., "12.50" or "12")
        amount: String,

        /// What the money was for
        #[arg(short, long)]
        description: String,

        /// Category (see `tally categories`)
        #[arg(short, long)]
        category: String,

        /// Transaction kind: income or expense
        #[arg(short, long, default_value = "expense")]
        kind: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    #[command(alias = "delete")]
    Remove {
        /// Transaction ID
        id: String,
    },

    /// List transactions, newest first
    List {
        /// Which transactions to show: all, income, expense
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Show balance, total income and total expenses
    Summary,

    /// Show the categories available for each kind
    Categories {
        /// Only show categories for this kind
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Export transactions to CSV or JSON
    Export {
        /// Which transactions to export: all, income, expense
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = Config::resolve(self.data_dir, self.verbose)?;
        let _logger = init_logging(config.log_level)?;

        // Categories is static data and never touches the ledger
        if let Commands::Categories { kind } = &self.command {
            return run_categories_command(kind.as_deref());
        }

        let store = FileStore::open(&config.data_dir).with_context(|| {
            format!(
                "Failed to open data directory: {}",
                config.data_dir.display()
            )
        })?;
        let mut ledger = LedgerStore::initialize(store);
        if let Some(issue) = ledger.load_issue() {
            eprintln!("Warning: {}", issue);
        }

        match self.command {
            Commands::Add {
                amount,
                description,
                category,
                kind,
                date,
            } => run_add_command(&mut ledger, amount, description, category, kind, date),
            Commands::Remove { id } => run_remove_command(&mut ledger, &id),
            Commands::List { filter } => run_list_command(&ledger, &filter),
            Commands::Summary => run_summary_command(&ledger),
            Commands::Export {
                filter,
                format,
                output,
            } => run_export_command(&ledger, &filter, &format, output),
            Commands::Categories { .. } => Ok(()),
        }
    }
}

fn run_add_command<S: BlobStore>(
    ledger: &mut LedgerStore<S>,
    amount: String,
    description: String,
    category: String,
    kind: String,
    date: Option<String>,
) -> Result<()> {
    let amount = parse_amount(&amount).context("Invalid amount format. Use '12.50' or '12'")?;
    let kind = parse_kind(&kind)?;
    let occurred_on = match date {
        Some(date_str) => parse_date(&date_str)
            .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))?,
        None => Local::now().date_naive(),
    };

    let input = NewTransaction::new(description, amount, kind, category, occurred_on);
    match ledger.add(input) {
        Ok(transaction) => {
            println!(
                "Recorded {}: {} {} ({})",
                transaction.kind,
                format_signed(&transaction),
                transaction.description,
                transaction.id
            );
            Ok(())
        }
        Err(LedgerError::Validation(err)) => {
            Err(anyhow::anyhow!("Please fill in all fields correctly: {}", err))
        }
        Err(err) => Err(err.into()),
    }
}

fn run_remove_command<S: BlobStore>(ledger: &mut LedgerStore<S>, id: &str) -> Result<()> {
    let id = Uuid::parse_str(id).with_context(|| format!("Invalid transaction ID: {}", id))?;
    if ledger.remove(id)? {
        println!("Deleted transaction {}", id);
    } else {
        println!("No transaction with ID {}", id);
    }
    Ok(())
}

fn run_list_command<S: BlobStore>(ledger: &LedgerStore<S>, filter: &str) -> Result<()> {
    let filter = parse_filter(filter)?;
    let transactions = filter_by(ledger.snapshot(), filter);

    if transactions.is_empty() {
        println!("No transactions yet");
        println!("Add your first transaction to get started");
        return Ok(());
    }

    println!(
        "{:<36} {:<13} {:<14} {:>14} DESCRIPTION",
        "ID", "DATE", "CATEGORY", "AMOUNT"
    );
    println!("{}", "-".repeat(100));
    for transaction in transactions {
        println!(
            "{:<36} {:<13} {:<14} {:>14} {}",
            transaction.id,
            format_date(transaction.occurred_on),
            truncate(&transaction.category, 14),
            format_signed(transaction),
            truncate(&transaction.description, 30)
        );
    }
    Ok(())
}

fn run_summary_command<S: BlobStore>(ledger: &LedgerStore<S>) -> Result<()> {
    let snapshot = ledger.snapshot();
    let totals = compute_totals(snapshot);

    println!("{:<16} {:>16}", "Total Balance", format_currency(totals.balance));
    println!("{:<16} {:>16}", "Total Income", format_currency(totals.income));
    println!("{:<16} {:>16}", "Total Expenses", format_currency(totals.expense));

    for kind in [TransactionKind::Income, TransactionKind::Expense] {
        let breakdown = category_breakdown(snapshot, kind);
        if breakdown.is_empty() {
            continue;
        }
        println!();
        println!("{} by category:", capitalize(kind.as_str()));
        for entry in breakdown {
            println!(
                "  {:<14} {:>16} ({})",
                entry.category,
                format_currency(entry.total),
                entry.count
            );
        }
    }
    Ok(())
}

fn run_categories_command(kind: Option<&str>) -> Result<()> {
    let kinds = match kind {
        Some(kind) => vec![parse_kind(kind)?],
        None => vec![TransactionKind::Income, TransactionKind::Expense],
    };

    for kind in kinds {
        println!("{}: {}", kind, kind.categories().join(", "));
    }
    Ok(())
}

fn run_export_command<S: BlobStore>(
    ledger: &LedgerStore<S>,
    filter: &str,
    format: &str,
    output: Option<String>,
) -> Result<()> {
    let filter = parse_filter(filter)?;
    let format = ExportFormat::from_str(format)
        .with_context(|| format!("Unknown export format '{}'. Use csv or json", format))?;
    let transactions = filter_by(ledger.snapshot(), filter);

    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path))?,
        ),
        None => Box::new(io::stdout()),
    };

    let count = export_transactions(&transactions, format, writer)?;
    if let Some(path) = output {
        eprintln!("Exported {} transactions to {}", count, path);
    }
    Ok(())
}

fn parse_kind(kind: &str) -> Result<TransactionKind> {
    TransactionKind::from_str(kind)
        .with_context(|| format!("Invalid kind '{}'. Use income or expense", kind))
}

fn parse_filter(filter: &str) -> Result<TransactionFilter> {
    TransactionFilter::from_str(filter)
        .with_context(|| format!("Invalid filter '{}'. Use all, income or expense", filter))
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").context("Date must be in YYYY-MM-DD format")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
