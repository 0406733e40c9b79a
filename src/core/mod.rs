//! Core business logic module
//!
//! This module contains the banking components:
//! - `identifier` - Card number and PIN generation, Luhn validation
//! - `traits` - The `Ledger` abstraction over the account store
//! - `ledger` - SQLite-backed ledger with atomic transfers
//! - `bank` - Caller-side operations and session configuration

pub mod bank;
pub mod identifier;
pub mod ledger;
pub mod traits;

pub use bank::{Bank, BankConfig, DEFAULT_MAX_ISSUE_ATTEMPTS, DEFAULT_STORE_FILE};
pub use ledger::SqliteLedger;
pub use traits::Ledger;
