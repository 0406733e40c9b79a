//! Card number and PIN generation
//!
//! Card numbers are 16 digits: the fixed issuer prefix, nine random digits and
//! a trailing Luhn check digit. All functions take the random source as an
//! argument so callers (and tests) control seeding.
//!
//! Uniqueness is not handled here; see [`crate::core::Bank::issue_account`].

use crate::types::BankError;
use rand::Rng;

/// Leading digits of every number issued by this bank
pub const ISSUER_PREFIX: &str = "400000";

/// Length of a complete card number
pub const CARD_NUMBER_LEN: usize = 16;

/// Length of the body the check digit is computed over
pub const BODY_LEN: usize = CARD_NUMBER_LEN - 1;

/// Length of a PIN
pub const PIN_LEN: usize = 4;

const ACCOUNT_ID_SPACE: u32 = 1_000_000_000;
const PIN_SPACE: u32 = 10_000;

/// Generate a fresh card number with a valid check digit
pub fn generate_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let body = format!("{}{:09}", ISSUER_PREFIX, rng.gen_range(0..ACCOUNT_ID_SPACE));
    let check = check_digit(body.as_bytes());
    format!("{}{}", body, check)
}

/// Generate a 4-digit PIN, leading zeros preserved
pub fn generate_pin<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:04}", rng.gen_range(0..PIN_SPACE))
}

/// Compute the Luhn check digit for a 15-digit body
///
/// # Errors
///
/// Returns [`BankError::InvalidCardNumber`] if `body` is not exactly 15 ASCII digits.
pub fn luhn_check_digit(body: &str) -> Result<u8, BankError> {
    if body.len() != BODY_LEN || !is_all_digits(body) {
        return Err(BankError::invalid_card_number(body));
    }
    Ok(check_digit(body.as_bytes()))
}

/// Check that `number` is 16 digits and ends in the correct check digit
pub fn validate(number: &str) -> bool {
    if number.len() != CARD_NUMBER_LEN || !is_all_digits(number) {
        return false;
    }
    let bytes = number.as_bytes();
    check_digit(&bytes[..BODY_LEN]) == bytes[BODY_LEN] - b'0'
}

fn is_all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

// Positions count from the left; even positions are doubled.
fn check_digit(body: &[u8]) -> u8 {
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}
