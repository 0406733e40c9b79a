//! CSV export of the account ledger
//!
//! Writes one row per account with columns `number,balance`. PINs are never
//! part of the export.

use crate::core::{BankConfig, Ledger, SqliteLedger};
use crate::types::{Account, Balance, BankError};
use serde::Serialize;
use std::io::Write;

/// Exported row for one account
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AccountRow<'a> {
    pub number: &'a str,
    pub balance: Balance,
}

impl<'a> From<&'a Account> for AccountRow<'a> {
    fn from(account: &'a Account) -> Self {
        AccountRow {
            number: &account.number,
            balance: account.balance,
        }
    }
}

/// Write accounts to CSV format
///
/// Accounts are sorted by card number for deterministic output. The header
/// is written even when there are no accounts.
///
/// # Arguments
///
/// * `accounts` - Slice of accounts to write
/// * `output` - Mutable reference to a writer for outputting CSV
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), BankError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(["number", "balance"])?;

    let mut sorted: Vec<&Account> = accounts.iter().collect();
    sorted.sort_by(|a, b| a.number.cmp(&b.number));

    for account in sorted {
        writer.serialize(AccountRow::from(account))?;
    }

    writer.flush()?;
    Ok(())
}

/// Open the configured store and write its accounts as CSV
pub fn export_store(config: &BankConfig, output: &mut dyn Write) -> Result<(), BankError> {
    let ledger = SqliteLedger::open(&config.store_path)?;
    let accounts = ledger.accounts()?;
    write_accounts_csv(&accounts, output)?;
    ledger.close()
}
