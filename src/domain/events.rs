//! Domain Events
//!
//! Every successful state change is expressed as an event first and then
//! applied to the account. Events carry the resulting balance so that
//! applying them cannot fail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, Balance, Email, InterestRate};

/// Account-related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountEvent {
    /// Account was registered
    AccountRegistered {
        account_id: Uuid,
        name: String,
        email: Email,
        initial_balance: Balance,
        registered_at: DateTime<Utc>,
    },

    /// Correct PIN entered
    LoginSucceeded {
        logged_in_at: DateTime<Utc>,
    },

    /// Wrong PIN entered; `locked` is set when the attempt hit the threshold
    LoginFailed {
        attempts: u32,
        locked: bool,
        failed_at: DateTime<Utc>,
    },

    /// Money was deposited
    MoneyDeposited {
        amount: Amount,
        new_balance: Balance,
        deposited_at: DateTime<Utc>,
    },

    /// Interest was credited
    InterestApplied {
        rate: InterestRate,
        /// May be zero when the product is below Decimal precision
        interest: Balance,
        new_balance: Balance,
        applied_at: DateTime<Utc>,
    },

    /// Money left this account towards another
    TransferSent {
        transfer_id: Uuid,
        to: Email,
        amount: Amount,
        new_balance: Balance,
        sent_at: DateTime<Utc>,
    },

    /// Money arrived from another account
    TransferReceived {
        transfer_id: Uuid,
        from: Email,
        amount: Amount,
        new_balance: Balance,
        received_at: DateTime<Utc>,
    },

    /// Money was withdrawn
    MoneyWithdrawn {
        amount: Amount,
        new_balance: Balance,
        withdrawn_at: DateTime<Utc>,
    },
}

impl AccountEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountRegistered { .. } => "AccountRegistered",
            AccountEvent::LoginSucceeded { .. } => "LoginSucceeded",
            AccountEvent::LoginFailed { .. } => "LoginFailed",
            AccountEvent::MoneyDeposited { .. } => "MoneyDeposited",
            AccountEvent::InterestApplied { .. } => "InterestApplied",
            AccountEvent::TransferSent { .. } => "TransferSent",
            AccountEvent::TransferReceived { .. } => "TransferReceived",
            AccountEvent::MoneyWithdrawn { .. } => "MoneyWithdrawn",
        }
    }

    /// Balance after the event, for events that move money
    pub fn new_balance(&self) -> Option<Balance> {
        match self {
            AccountEvent::MoneyDeposited { new_balance, .. }
            | AccountEvent::InterestApplied { new_balance, .. }
            | AccountEvent::TransferSent { new_balance, .. }
            | AccountEvent::TransferReceived { new_balance, .. }
            | AccountEvent::MoneyWithdrawn { new_balance, .. } => Some(*new_balance),
            AccountEvent::AccountRegistered { initial_balance, .. } => Some(*initial_balance),
            AccountEvent::LoginSucceeded { .. } | AccountEvent::LoginFailed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_event_type_and_balance() {
        let event = AccountEvent::MoneyDeposited {
            amount: Amount::new(dec!(10)).unwrap(),
            new_balance: Balance::new(dec!(110)).unwrap(),
            deposited_at: Utc::now(),
        };
        assert_eq!(event.event_type(), "MoneyDeposited");
        assert_eq!(event.new_balance().unwrap().value(), dec!(110));

        let event = AccountEvent::LoginSucceeded { logged_in_at: Utc::now() };
        assert!(event.new_balance().is_none());
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = AccountEvent::LoginFailed {
            attempts: 2,
            locked: false,
            failed_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "LoginFailed");
        assert_eq!(json["attempts"], 2);
    }
}
