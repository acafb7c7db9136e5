//! Transaction CLI commands
//!
//! Implements CLI commands for ledger management.

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::models::transaction::parse_date;
use crate::models::{Money, Transaction, TransactionId, TransactionInput, TransactionType};
use crate::services::{today, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Income or Expense
        kind: String,
        /// Amount (e.g., "42.50"); never negative
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Category name
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Free-form tags
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Replace fields of an existing transaction
    Update {
        /// Transaction ID
        id: String,
        /// New type
        #[arg(short = 'k', long = "type")]
        kind: Option<String>,
        /// New amount
        #[arg(short, long, allow_negative_numbers = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// New tags
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// List transactions, newest first
    List {
        /// Case-insensitive text to find in description or category
        #[arg(short, long)]
        search: Option<String>,
        /// Only this category ("All" for every category)
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(storage: &Storage, cmd: TransactionCommands) -> LedgerResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            description,
            tags,
        } => {
            let date = date.unwrap_or_else(|| today().format("%Y-%m-%d").to_string());
            let input = TransactionInput::from_fields(
                &date,
                &category,
                description.as_deref(),
                &amount,
                &kind,
                tags.as_deref(),
            )
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

            let id = service.add(input)?;
            if let Some(txn) = service.get(id)? {
                println!("Created transaction:");
                print_details(&txn);
            }
        }

        TransactionCommands::Update {
            id,
            kind,
            amount,
            category,
            date,
            description,
            tags,
        } => {
            let id = parse_id(&id)?;
            let existing = service
                .get(id)?
                .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

            let mut input = existing.to_input();
            if let Some(kind) = kind {
                input.kind = kind
                    .parse::<TransactionType>()
                    .map_err(|e| LedgerError::Validation(e.to_string()))?;
            }
            if let Some(amount) = amount {
                input.amount = Money::parse(&amount)
                    .map_err(|e| LedgerError::Validation(e.to_string()))?;
            }
            if let Some(category) = category {
                input.category = category.trim().to_string();
            }
            if let Some(date) = date {
                input.date = parse_date(&date).map_err(|e| LedgerError::Validation(e.to_string()))?;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if let Some(tags) = tags {
                input.tags = tags;
            }

            let updated = service.update(id, input)?;
            println!("Updated transaction:");
            print_details(&updated);
        }

        TransactionCommands::Delete { id } => {
            let id = parse_id(&id)?;
            service.delete(id)?;
            println!("Deleted transaction: {}", id);
        }

        TransactionCommands::List {
            search,
            category,
            limit,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(text) = search {
                filter = filter.search(text);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let transactions = service.list(&filter)?;
            if transactions.is_empty() {
                println!("No transactions found.");
                return Ok(());
            }

            print!("{}", format_register(&transactions));
            println!("\nShowing {} transactions", transactions.len());
        }
    }

    Ok(())
}

fn parse_id(raw: &str) -> LedgerResult<TransactionId> {
    raw.parse()
        .map_err(|_| LedgerError::Validation(format!("Invalid transaction ID: '{}'", raw)))
}

fn print_details(txn: &Transaction) {
    println!("  ID:          {}", txn.id);
    println!("  Date:        {}", txn.date);
    println!("  Type:        {}", txn.kind);
    println!("  Amount:      {}", txn.amount);
    println!("  Category:    {}", txn.category);
    if !txn.description.is_empty() {
        println!("  Description: {}", txn.description);
    }
    if !txn.tags.is_empty() {
        println!("  Tags:        {}", txn.tags);
    }
}

fn format_register(transactions: &[Transaction]) -> String {
    let mut output = format!(
        "{:<6} {:<10}  {:<8} {:<18} {:>12}  {}\n",
        "ID", "Date", "Type", "Category", "Amount", "Description"
    );
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format!(
            "{:<6} {}  {:<8} {:<18} {:>12}  {}\n",
            txn.id.to_string(),
            txn.date,
            txn.kind.as_str(),
            txn.category,
            txn.amount.to_string(),
            txn.description
        ));
    }

    output
}
