//! Core trait for the account ledger
//!
//! The [`Ledger`] trait is the seam between the caller-side [`crate::core::Bank`]
//! and the persistent store, so the bank and session can be driven against any
//! store that provides the same atomicity guarantees.

use crate::types::{Account, Balance, BankError};

/// Persisted account records and the operations allowed on them
///
/// Implementations enforce the financial invariants on their own: no
/// operation may leave a negative balance, and `transfer` is all-or-nothing.
pub trait Ledger {
    /// Insert a new account with a zero balance
    ///
    /// Callers check [`Ledger::exists`] first. A uniqueness violation from the
    /// store is reported as [`BankError::DuplicateAccount`].
    fn create(&mut self, number: &str, pin: &str) -> Result<(), BankError>;

    /// Whether an account with this number exists
    fn exists(&self, number: &str) -> Result<bool, BankError>;

    /// Whether an account with exactly this number and PIN exists
    fn authenticate(&self, number: &str, pin: &str) -> Result<bool, BankError>;

    /// Stored balance, or [`BankError::AccountNotFound`]
    fn balance(&self, number: &str) -> Result<Balance, BankError>;

    /// Add a strictly positive amount to an account
    fn credit(&mut self, number: &str, amount: Balance) -> Result<(), BankError>;

    /// Remove an account; removing an absent account is a no-op
    fn delete(&mut self, number: &str) -> Result<(), BankError>;

    /// Move a strictly positive amount between two accounts atomically
    fn transfer(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: Balance,
    ) -> Result<(), BankError>;

    /// Every account, ordered by number
    fn accounts(&self) -> Result<Vec<Account>, BankError>;
}
