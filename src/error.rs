//! Error handling module
//!
//! Centralized ledger error type. The `Display` text of every variant is the
//! message handed back to the caller, so wording here is part of the API.

/// Ledger-wide Result type
pub type LedgerResult<T> = Result<T, LedgerError>;

use serde::{Deserialize, Serialize};

/// Broad error category, used by callers that only care about the class of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed name, email, pin or numeric input
    InputFormat,
    /// Unknown email
    NotFound,
    /// Not logged in, or account locked
    Authorization,
    /// Amount, rate or balance rule violated
    BusinessRule,
}

/// Ledger error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    // Input format errors
    #[error("Invalid registration input.")]
    InvalidRegistration,

    #[error("Invalid email or PIN format.")]
    InvalidCredentialsFormat,

    #[error("Invalid numeric input: {0}")]
    InvalidNumber(String),

    // Not found errors
    #[error("User does not exist.")]
    UserNotFound,

    #[error("Sender or receiver does not exist.")]
    PartyNotFound,

    // Authorization errors
    #[error("Account is locked due to too many failed login attempts.")]
    AccountLocked,

    #[error("Account locked due to multiple failed attempts.")]
    LockedOut,

    #[error("Incorrect PIN. Attempts: {attempts}")]
    IncorrectPin { attempts: u32 },

    #[error("Access denied. User not logged in.")]
    AccessDenied,

    #[error("User not logged in.")]
    NotLoggedIn,

    #[error("Both users must be logged in.")]
    PartiesNotLoggedIn,

    // Business rule violations
    #[error("User already exists.")]
    UserAlreadyExists,

    #[error("Deposit amount must be positive.")]
    InvalidDepositAmount,

    #[error("Invalid interest rate.")]
    InvalidInterestRate,

    #[error("No interest accrued on zero or negative balance.")]
    NoInterestAccrued,

    #[error("Cannot transfer to self.")]
    SelfTransfer,

    #[error("Insufficient funds or invalid amount.")]
    InvalidTransfer,

    #[error("Invalid withdrawal amount.")]
    InvalidWithdrawal,
}

impl LedgerError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidRegistration
            | LedgerError::InvalidCredentialsFormat
            | LedgerError::InvalidNumber(_) => ErrorKind::InputFormat,

            LedgerError::UserNotFound | LedgerError::PartyNotFound => ErrorKind::NotFound,

            LedgerError::AccountLocked
            | LedgerError::LockedOut
            | LedgerError::IncorrectPin { .. }
            | LedgerError::AccessDenied
            | LedgerError::NotLoggedIn
            | LedgerError::PartiesNotLoggedIn => ErrorKind::Authorization,

            LedgerError::UserAlreadyExists
            | LedgerError::InvalidDepositAmount
            | LedgerError::InvalidInterestRate
            | LedgerError::NoInterestAccrued
            | LedgerError::SelfTransfer
            | LedgerError::InvalidTransfer
            | LedgerError::InvalidWithdrawal => ErrorKind::BusinessRule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_caller_contract() {
        assert_eq!(LedgerError::InvalidRegistration.to_string(), "Invalid registration input.");
        assert_eq!(LedgerError::UserAlreadyExists.to_string(), "User already exists.");
        assert_eq!(
            LedgerError::IncorrectPin { attempts: 3 }.to_string(),
            "Incorrect PIN. Attempts: 3"
        );
        assert_eq!(
            LedgerError::AccessDenied.to_string(),
            "Access denied. User not logged in."
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(LedgerError::InvalidCredentialsFormat.kind(), ErrorKind::InputFormat);
        assert_eq!(LedgerError::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(LedgerError::AccountLocked.kind(), ErrorKind::Authorization);
        assert_eq!(LedgerError::SelfTransfer.kind(), ErrorKind::BusinessRule);
    }
}
