//! Simple Banking System Library
//! # Overview
//!
//! This library provides a terminal banking simulator: it issues card accounts,
//! tracks their balances in a SQLite store, and moves money between them
//! without ever overdrawing an account or leaving a transfer half-applied.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Card, BankError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::identifier`] - Card number and PIN generation with Luhn check digits
//!   - [`core::ledger`] - SQLite-backed account ledger and atomic transfers
//!   - [`core::bank`] - Caller-side operations and configuration
//! - [`session`] - Interactive menu state machine
//! - [`io`] - CSV export of the ledger
//!
//! # Operations
//!
//! - **Create an account**: issue a fresh card number and PIN with a zero balance
//! - **Log in**: match a card number and PIN
//! - **Balance**: read the stored balance
//! - **Add income**: credit a positive amount
//! - **Do transfer**: move a positive amount to another existing card
//! - **Close account**: delete the card permanently
//!
//! # Card Numbers
//!
//! Every number is 16 digits: the issuer prefix `400000`, nine random digits
//! and a Luhn check digit.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod session;
pub mod types;

pub use crate::core::{Bank, BankConfig, Ledger, SqliteLedger};
pub use crate::io::{export_store, write_accounts_csv};
pub use crate::session::{run_session, Session, State};
pub use crate::types::{Account, Balance, BankError, Card};
