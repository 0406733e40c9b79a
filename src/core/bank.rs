//! Caller-side banking operations
//!
//! This module provides the [`Bank`] facade the interactive session talks to.
//! Each operation maps onto one [`Ledger`] call; the bank adds the parts that
//! belong to the caller:
//! - Issuing accounts with generate-check-insert, bounded by an attempt budget
//! - Luhn and existence checks on a transfer recipient
//!
//! The random source is owned by the bank and passed in by the constructor, so
//! tests can drive issuance from a seeded generator.

use crate::core::identifier;
use crate::core::traits::Ledger;
use crate::types::{Account, Balance, BankError, Card};
use rand::Rng;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Store file used when none is given on the command line
pub const DEFAULT_STORE_FILE: &str = "db.s3db";

/// Issuance attempts before giving up on finding a free card number
pub const DEFAULT_MAX_ISSUE_ATTEMPTS: u32 = 1000;

/// Runtime configuration for a banking session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankConfig {
    /// Path of the SQLite store file
    pub store_path: PathBuf,
    /// Maximum number of generated card numbers tried per issuance
    pub max_issue_attempts: u32,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            max_issue_attempts: DEFAULT_MAX_ISSUE_ATTEMPTS,
        }
    }
}

impl BankConfig {
    /// Create a BankConfig with custom values
    ///
    /// A zero attempt budget would make issuance impossible, so it falls back
    /// to the default.
    pub fn new(store_path: PathBuf, max_issue_attempts: u32) -> Self {
        let max_issue_attempts = if max_issue_attempts == 0 {
            warn!(
                default = DEFAULT_MAX_ISSUE_ATTEMPTS,
                "invalid max_issue_attempts (0), using default"
            );
            DEFAULT_MAX_ISSUE_ATTEMPTS
        } else {
            max_issue_attempts
        };

        Self {
            store_path,
            max_issue_attempts,
        }
    }
}

/// Banking operations over a ledger and a random source
pub struct Bank<L, R> {
    ledger: L,
    rng: R,
    max_issue_attempts: u32,
}

impl<L: Ledger, R: Rng> Bank<L, R> {
    /// Create a new Bank
    ///
    /// # Arguments
    ///
    /// * `ledger` - The account store
    /// * `rng` - Random source for card numbers and PINs
    /// * `max_issue_attempts` - Collision retries allowed per issued account
    pub fn new(ledger: L, rng: R, max_issue_attempts: u32) -> Self {
        Bank {
            ledger,
            rng,
            max_issue_attempts,
        }
    }

    /// Issue a new account with a fresh, unused card number and a random PIN
    ///
    /// # Errors
    ///
    /// Returns [`BankError::ExhaustedIdentifierSpace`] when every generated
    /// number within the attempt budget was already taken, or any error
    /// reported by the ledger.
    pub fn issue_account(&mut self) -> Result<Card, BankError> {
        for attempt in 1..=self.max_issue_attempts {
            let number = identifier::generate_number(&mut self.rng);
            if self.ledger.exists(&number)? {
                debug!(attempt, number = %number, "card number already taken, retrying");
                continue;
            }

            let pin = identifier::generate_pin(&mut self.rng);
            self.ledger.create(&number, &pin)?;
            info!(number = %number, attempt, "issued account");
            return Ok(Card { number, pin });
        }

        error!(
            attempts = self.max_issue_attempts,
            "no free card number found"
        );
        Err(BankError::ExhaustedIdentifierSpace {
            attempts: self.max_issue_attempts,
        })
    }

    /// Whether the number and PIN identify an existing account
    pub fn login(&self, number: &str, pin: &str) -> Result<bool, BankError> {
        let authenticated = self.ledger.authenticate(number, pin)?;
        if !authenticated {
            warn!(number, "failed login attempt");
        }
        Ok(authenticated)
    }

    /// Balance of a logged-in account
    pub fn balance_of(&self, number: &str) -> Result<Balance, BankError> {
        self.ledger.balance(number)
    }

    /// Add income to an account
    pub fn deposit(&mut self, number: &str, amount: Balance) -> Result<(), BankError> {
        self.ledger.credit(number, amount)
    }

    /// Check that a transfer recipient is a well-formed, existing card
    ///
    /// # Errors
    ///
    /// - [`BankError::InvalidCardNumber`] if the number fails the Luhn check
    /// - [`BankError::UnknownCard`] if no such account exists
    pub fn check_recipient(&self, number: &str) -> Result<(), BankError> {
        if !identifier::validate(number) {
            return Err(BankError::invalid_card_number(number));
        }
        if !self.ledger.exists(number)? {
            return Err(BankError::unknown_card(number));
        }
        Ok(())
    }

    /// Move money to another card
    ///
    /// The recipient is checked first; the ledger then runs the transfer as a
    /// single unit of work. Transferring to the sender's own card is allowed.
    pub fn transfer(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: Balance,
    ) -> Result<(), BankError> {
        self.check_recipient(recipient)?;
        self.ledger.transfer(sender, recipient, amount)
    }

    /// Close an account permanently
    pub fn close(&mut self, number: &str) -> Result<(), BankError> {
        self.ledger.delete(number)?;
        info!(number, "closed account");
        Ok(())
    }

    /// Every account in the ledger
    pub fn accounts(&self) -> Result<Vec<Account>, BankError> {
        self.ledger.accounts()
    }

    /// Give back the ledger, e.g. to close it explicitly
    pub fn into_ledger(self) -> L {
        self.ledger
    }
}
