//! Operation status records
//!
//! Flat result records for callers that want a success flag and a message
//! instead of a `Result`. Built from `LedgerResult` values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, LedgerError, LedgerResult};

/// Outcome of a mutating operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationStatus {
    pub success: bool,
    pub message: String,
    /// Failure class, absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl OperationStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error_kind: None,
        }
    }

    pub fn failed(error: &LedgerError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            error_kind: Some(error.kind()),
        }
    }
}

impl From<LedgerResult<String>> for OperationStatus {
    fn from(result: LedgerResult<String>) -> Self {
        match result {
            Ok(message) => Self::ok(message),
            Err(e) => Self::failed(&e),
        }
    }
}

/// Balance view. On failure every figure is zero and the history empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub balance: Decimal,
    pub transactions: Vec<String>,
    pub interest_rate: Decimal,
    pub message: String,
}

impl BalanceInfo {
    pub fn denied(error: &LedgerError) -> Self {
        Self {
            balance: Decimal::ZERO,
            transactions: Vec::new(),
            interest_rate: Decimal::ZERO,
            message: error.to_string(),
        }
    }
}

impl From<LedgerResult<BalanceInfo>> for BalanceInfo {
    fn from(result: LedgerResult<BalanceInfo>) -> Self {
        result.unwrap_or_else(|e| Self::denied(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_result() {
        let status = OperationStatus::from(Ok("Login successful.".to_string()));
        assert!(status.success);
        assert_eq!(status.message, "Login successful.");

        let status = OperationStatus::from(Err(LedgerError::SelfTransfer));
        assert!(!status.success);
        assert_eq!(status.message, "Cannot transfer to self.");
    }

    #[test]
    fn test_status_carries_error_kind() {
        let status = OperationStatus::ok("Login successful.");
        assert_eq!(status.error_kind, None);
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({"success": true, "message": "Login successful."})
        );

        let status = OperationStatus::failed(&LedgerError::NotLoggedIn);
        assert_eq!(status.error_kind, Some(ErrorKind::Authorization));
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({
                "success": false,
                "message": "User not logged in.",
                "error_kind": "authorization"
            })
        );

        let status = OperationStatus::from(Err(LedgerError::InvalidNumber("ten".to_string())));
        assert_eq!(status.error_kind, Some(ErrorKind::InputFormat));
    }

    #[test]
    fn test_balance_info_denied() {
        let info = BalanceInfo::from(Err(LedgerError::UserNotFound));
        assert_eq!(info.balance, Decimal::ZERO);
        assert!(info.transactions.is_empty());
        assert_eq!(info.interest_rate, Decimal::ZERO);
        assert_eq!(info.message, "User does not exist.");
    }
}
