//! Credential validation
//!
//! Email and PIN format rules shared by registration and login.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Required PIN length
pub const PIN_LENGTH: usize = 4;

/// An email is acceptable when non-empty and containing both '@' and '.'
pub fn valid_email(email: &str) -> bool {
    !email.is_empty() && email.contains('@') && email.contains('.')
}

/// A PIN is exactly four ASCII digits
pub fn valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit())
}

/// Email that passed format validation
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Option<Self> {
        valid_email(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Four-digit PIN. Stored and compared as plain text.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin(String);

impl Pin {
    pub fn parse(raw: &str) -> Option<Self> {
        valid_pin(raw).then(|| Self(raw.to_string()))
    }

    pub fn matches(&self, entered: &Pin) -> bool {
        self.0 == entered.0
    }
}

// Never print the PIN itself.
impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(valid_email("alice@example.com"));
        assert!(!valid_email(""));
        assert!(!valid_email("alice.example.com"));
        assert!(!valid_email("alice@example"));
        assert!(!valid_email("*m"));
    }

    #[test]
    fn test_valid_pin() {
        assert!(valid_pin("1234"));
        assert!(valid_pin("0000"));
        assert!(!valid_pin("123"));
        assert!(!valid_pin("12345"));
        assert!(!valid_pin("E^G)"));
        assert!(!valid_pin("12a4"));
        // only ASCII 0-9 form a PIN, other Unicode digits are rejected
        assert!(!valid_pin("١٢٣٤"));
    }

    #[test]
    fn test_pin_debug_is_masked() {
        let pin = Pin::parse("1234").unwrap();
        assert_eq!(format!("{:?}", pin), "Pin(****)");
        assert!(pin.matches(&Pin::parse("1234").unwrap()));
        assert!(!pin.matches(&Pin::parse("4321").unwrap()));
    }
}
