//! Configuration module for fintrack
//!
//! This module provides configuration management including:
//! - Path resolution for the store, settings and backups
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{BackupRetention, Settings};
