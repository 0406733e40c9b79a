//! Error types for the banking simulator
//!
//! This module defines every error a ledger or session operation can produce.
//! Errors are designed to be descriptive enough for log output while the
//! session decides which of them the user gets to see.
//!
//! # Error Categories
//!
//! - **Validation Errors**: bad card numbers, malformed or non-positive amounts
//! - **Business Outcomes**: insufficient funds, unknown recipient card
//! - **Contract Violations**: operations on accounts the caller should have checked
//! - **Storage Errors**: any failure reported by SQLite
//!
//! Only validation errors and business outcomes are recoverable; see
//! [`BankError::is_recoverable`].

use thiserror::Error;

/// Main error type for the banking simulator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// Card number is not 16 digits or fails the Luhn check
    ///
    /// Recoverable: the user is asked to try again.
    #[error("Invalid card number '{number}'")]
    InvalidCardNumber {
        /// The rejected input
        number: String,
    },

    /// Amount input could not be parsed as an integer
    ///
    /// Recoverable: the user is asked to try again.
    #[error("Invalid amount '{input}'")]
    InvalidAmount {
        /// The raw input
        input: String,
    },

    /// Amount is zero or negative
    ///
    /// Recoverable: nothing is written to the store.
    #[error("Amount must be positive for {operation}, got {amount}")]
    NonPositiveAmount {
        /// Operation that rejected the amount
        operation: String,
        /// The rejected amount
        amount: i64,
    },

    /// Recipient card does not exist (checked at the boundary before transferring)
    #[error("Card {number} does not exist")]
    UnknownCard {
        /// The card number that was looked up
        number: String,
    },

    /// Sender cannot cover the transfer, or the sender no longer exists
    ///
    /// Recoverable: both accounts are left untouched.
    #[error("Insufficient funds on {number}: requested {requested}")]
    InsufficientFunds {
        /// Sender card number
        number: String,
        /// Requested transfer amount
        requested: i64,
    },

    /// Account was expected to exist but does not
    ///
    /// Fatal: the caller skipped a required existence check.
    #[error("Account not found: {number}")]
    AccountNotFound {
        /// The missing card number
        number: String,
    },

    /// Recipient vanished between validation and the credit step of a transfer
    ///
    /// Fatal: the transfer has been rolled back.
    #[error("Recipient {number} not found during transfer")]
    RecipientNotFound {
        /// The missing recipient card number
        number: String,
    },

    /// Balance would exceed the representable range
    #[error("Arithmetic overflow in {operation} for {number}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Card number whose balance would overflow
        number: String,
    },

    /// Store reported a uniqueness violation on insert
    #[error("Account {number} already exists")]
    DuplicateAccount {
        /// The duplicated card number
        number: String,
    },

    /// No unused card number was found within the attempt budget
    #[error("No free card number found after {attempts} attempts")]
    ExhaustedIdentifierSpace {
        /// Number of generation attempts made
        attempts: u32,
    },

    /// Failure of the underlying store
    ///
    /// Any in-flight unit of work has been rolled back.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },

    /// I/O error on the session reader or writer
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<rusqlite::Error> for BankError {
    fn from(error: rusqlite::Error) -> Self {
        BankError::Storage {
            message: error.to_string(),
        }
    }
}

impl BankError {
    /// Whether the session may report this error and keep going
    ///
    /// Everything else indicates a logic bug or a broken store and must end
    /// the session rather than continue in a possibly inconsistent state.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BankError::InvalidCardNumber { .. }
                | BankError::InvalidAmount { .. }
                | BankError::NonPositiveAmount { .. }
                | BankError::UnknownCard { .. }
                | BankError::InsufficientFunds { .. }
        )
    }

    /// Create an InvalidCardNumber error
    pub fn invalid_card_number(number: &str) -> Self {
        BankError::InvalidCardNumber {
            number: number.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(input: &str) -> Self {
        BankError::InvalidAmount {
            input: input.to_string(),
        }
    }

    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(operation: &str, amount: i64) -> Self {
        BankError::NonPositiveAmount {
            operation: operation.to_string(),
            amount,
        }
    }

    /// Create an UnknownCard error
    pub fn unknown_card(number: &str) -> Self {
        BankError::UnknownCard {
            number: number.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(number: &str, requested: i64) -> Self {
        BankError::InsufficientFunds {
            number: number.to_string(),
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(number: &str) -> Self {
        BankError::AccountNotFound {
            number: number.to_string(),
        }
    }

    /// Create a RecipientNotFound error
    pub fn recipient_not_found(number: &str) -> Self {
        BankError::RecipientNotFound {
            number: number.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, number: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            number: number.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(number: &str) -> Self {
        BankError::DuplicateAccount {
            number: number.to_string(),
        }
    }
}
