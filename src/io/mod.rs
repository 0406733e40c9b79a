//! I/O module
//!
//! Handles CSV output of the ledger.
//!
//! # Components
//!
//! - `csv_format` - CSV export of account numbers and balances

pub mod csv_format;

pub use csv_format::{export_store, write_accounts_csv, AccountRow};
