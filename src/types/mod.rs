//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account record and issued card credentials
//! - `error`: Error types for the banking simulator

pub mod account;
pub mod error;

pub use account::{Account, Balance, Card};
pub use error::BankError;
