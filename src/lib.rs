//! fintrack - personal ledger and budget tracker
//!
//! This library provides the engine behind the `fintrack` binary: a ledger
//! of income and expense transactions, per-category budgets with weekly,
//! monthly or yearly windows, read-only aggregations over both, CSV/JSON
//! interchange and whole-store backups.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, money, periods)
//! - `storage`: Single-file JSON store with atomic commits
//! - `services`: Business logic and aggregation layer
//! - `reports`: Terminal views over the aggregations
//! - `import` / `export`: CSV and JSON interchange
//! - `backup`: Snapshots, managed backups and restore
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::LedgerPaths;
//! use fintrack::services::SummaryService;
//! use fintrack::storage::Storage;
//!
//! let storage = Storage::open(LedgerPaths::new()?)?;
//! let balance = SummaryService::new(&storage).total_balance()?;
//! ```

use std::sync::Once;

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Logs go to stderr at `info` for this crate unless `RUST_LOG` says
/// otherwise. Calling this more than once is a no-op.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "fintrack=info".parse() {
            filter = filter.add_directive(directive);
        }

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
