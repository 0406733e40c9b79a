//! SQLite-backed account ledger
//!
//! This module provides [`SqliteLedger`], the persistent implementation of the
//! [`Ledger`] trait. Every call round-trips the store; nothing is cached.
//!
//! The ledger is responsible for:
//! - Creating the `card` table on first use (existing store files are reused)
//! - Point reads and updates of single accounts
//! - Running transfers as one SQLite transaction with a conditional debit
//!
//! # Transfers
//!
//! The debit is a single `UPDATE ... WHERE balance >= amount`, never a
//! read-then-write. The transaction is committed only when the debit and the
//! credit each touched exactly one row; every other outcome rolls back, and a
//! [`rusqlite::Transaction`] dropped on an error path rolls back as well.

use crate::core::traits::Ledger;
use crate::types::{Account, Balance, BankError};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, TransactionBehavior};
use std::path::Path;
use tracing::{debug, error, warn};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS card (
        id INTEGER PRIMARY KEY,
        number TEXT NOT NULL,
        pin TEXT NOT NULL,
        balance INTEGER DEFAULT 0
    );
    CREATE UNIQUE INDEX IF NOT EXISTS idx_card_number ON card(number);
";

/// Account ledger stored in a single SQLite file
pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    /// Open (or create) the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BankError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened ledger store");
        Self::with_connection(conn)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self, BankError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, BankError> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteLedger { conn })
    }

    /// Release the connection, reporting any failure to close it
    ///
    /// Dropping the ledger also closes the connection but swallows errors.
    pub fn close(self) -> Result<(), BankError> {
        self.conn.close().map_err(|(_, e)| BankError::from(e))?;
        debug!("closed ledger store");
        Ok(())
    }
}

fn require_positive(operation: &str, amount: Balance) -> Result<(), BankError> {
    if amount <= 0 {
        warn!(operation, amount, "rejected non-positive amount");
        return Err(BankError::non_positive_amount(operation, amount));
    }
    Ok(())
}

fn account_exists(conn: &Connection, number: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM card WHERE number = ?1)",
        params![number],
        |row| row.get(0),
    )
}

impl Ledger for SqliteLedger {
    fn create(&mut self, number: &str, pin: &str) -> Result<(), BankError> {
        let result = self.conn.execute(
            "INSERT INTO card (number, pin, balance) VALUES (?1, ?2, 0)",
            params![number, pin],
        );

        match result {
            Ok(_) => {
                debug!(number, "created account");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                error!(number, "store rejected duplicate card number");
                Err(BankError::duplicate_account(number))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, number: &str) -> Result<bool, BankError> {
        Ok(account_exists(&self.conn, number)?)
    }

    fn authenticate(&self, number: &str, pin: &str) -> Result<bool, BankError> {
        // PINs are stored unhashed; see DESIGN.md.
        let found: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM card WHERE number = ?1 AND pin = ?2)",
            params![number, pin],
            |row| row.get(0),
        )?;
        Ok(found)
    }

    fn balance(&self, number: &str) -> Result<Balance, BankError> {
        self.conn
            .query_row(
                "SELECT balance FROM card WHERE number = ?1",
                params![number],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| BankError::account_not_found(number))
    }

    fn credit(&mut self, number: &str, amount: Balance) -> Result<(), BankError> {
        require_positive("credit", amount)?;

        let updated = self.conn.execute(
            "UPDATE card SET balance = balance + ?1 WHERE number = ?2 AND balance <= ?3",
            params![amount, number, Balance::MAX - amount],
        )?;

        if updated == 0 {
            return if account_exists(&self.conn, number)? {
                Err(BankError::arithmetic_overflow("credit", number))
            } else {
                Err(BankError::account_not_found(number))
            };
        }

        debug!(number, amount, "credited account");
        Ok(())
    }

    fn delete(&mut self, number: &str) -> Result<(), BankError> {
        let removed = self
            .conn
            .execute("DELETE FROM card WHERE number = ?1", params![number])?;
        debug!(number, removed, "deleted account");
        Ok(())
    }

    fn transfer(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: Balance,
    ) -> Result<(), BankError> {
        require_positive("transfer", amount)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let debited = tx.execute(
            "UPDATE card SET balance = balance - ?1 WHERE number = ?2 AND balance >= ?1",
            params![amount, sender],
        )?;
        if debited != 1 {
            tx.rollback()?;
            if debited == 0 {
                warn!(sender, amount, "transfer rejected: insufficient funds");
                return Err(BankError::insufficient_funds(sender, amount));
            }
            error!(sender, debited, "transfer debit matched several rows");
            return Err(BankError::Storage {
                message: format!("debit of {} matched {} rows", sender, debited),
            });
        }

        let credited = tx.execute(
            "UPDATE card SET balance = balance + ?1 WHERE number = ?2 AND balance <= ?3",
            params![amount, recipient, Balance::MAX - amount],
        )?;
        if credited != 1 {
            let recipient_present = account_exists(&tx, recipient)?;
            tx.rollback()?;
            if credited == 0 && recipient_present {
                error!(recipient, amount, "transfer rolled back: recipient balance overflow");
                return Err(BankError::arithmetic_overflow("transfer", recipient));
            }
            if credited == 0 {
                error!(sender, recipient, "transfer rolled back: recipient vanished");
                return Err(BankError::recipient_not_found(recipient));
            }
            error!(recipient, credited, "transfer credit matched several rows");
            return Err(BankError::Storage {
                message: format!("credit of {} matched {} rows", recipient, credited),
            });
        }

        tx.commit()?;
        debug!(sender, recipient, amount, "transfer committed");
        Ok(())
    }

    fn accounts(&self) -> Result<Vec<Account>, BankError> {
        let mut stmt = self
            .conn
            .prepare("SELECT number, pin, balance FROM card ORDER BY number")?;
        let rows = stmt.query_map([], |row| {
            Ok(Account {
                number: row.get(0)?,
                pin: row.get(1)?,
                balance: row.get(2)?,
            })
        })?;
        let accounts = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(accounts)
    }
}
