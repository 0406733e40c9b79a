//! Account-related types for the banking simulator
//!
//! This module defines the persisted Account record and the Card value handed
//! to the user when a new account is issued.

use std::fmt;

/// Balance in currency minor units
pub type Balance = i64;

/// Persisted account state
///
/// Mirrors one row of the `card` table. The surrogate row id is never exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// 16-digit card number with a Luhn check digit
    pub number: String,

    /// 4-digit PIN, stored and compared in plain text
    pub pin: String,

    /// Current balance
    ///
    /// Never negative after a committed operation.
    pub balance: Balance,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(number: impl Into<String>, pin: impl Into<String>) -> Self {
        Account {
            number: number.into(),
            pin: pin.into(),
            balance: 0,
        }
    }
}

/// Credentials of a freshly issued account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub number: String,
    pub pin: String,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your card number:")?;
        writeln!(f, "{}", self.number)?;
        writeln!(f, "Your card PIN:")?;
        writeln!(f, "{}", self.pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_starts_at_zero() {
        let account = Account::new("4000001234567899", "0042");
        assert_eq!(account.balance, 0);
        assert_eq!(account.pin, "0042");
    }

    #[test]
    fn test_card_display() {
        let card = Card {
            number: "4000001234567899".to_string(),
            pin: "0007".to_string(),
        };
        assert_eq!(
            card.to_string(),
            "Your card number:\n4000001234567899\nYour card PIN:\n0007\n"
        );
    }
}
