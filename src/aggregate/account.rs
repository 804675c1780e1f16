//! Account Aggregate
//!
//! Account is the wallet record of one user: identity, credentials, balance
//! and history. Command methods validate against the current state and return
//! the event to apply; they never mutate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountEvent, Amount, Balance, Email, InterestRate, Pin};
use crate::error::LedgerError;

use super::Aggregate;

/// Account Aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account ID
    id: Uuid,

    /// Display name
    name: String,

    /// Email (unique key in the store)
    email: Email,

    /// Four-digit PIN
    pin: Pin,

    /// Current balance (derived from events)
    balance: Balance,

    logged_in: bool,

    /// Consecutive wrong PINs since the last successful login
    login_attempts: u32,

    /// Set permanently once `login_attempts` reaches the threshold
    locked: bool,

    /// Human-readable history, append-only
    transactions: Vec<String>,

    interest_rate: InterestRate,

    /// User-facing outcome messages, append-only
    notifications: Vec<String>,

    /// Current version (number of events applied)
    version: i64,

    /// When the account was registered
    created_at: Option<DateTime<Utc>>,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            name: String::new(),
            email: Email::default(),
            pin: Pin::default(),
            balance: Balance::zero(),
            logged_in: false,
            login_attempts: 0,
            locked: false,
            transactions: Vec::new(),
            interest_rate: InterestRate::default(),
            notifications: Vec::new(),
            version: 0,
            created_at: None,
        }
    }
}

impl Account {
    // =========================================================================
    // Registration
    // =========================================================================

    /// Create a new account and generate the registration event
    pub fn create(
        name: String,
        email: Email,
        pin: Pin,
        initial_balance: Balance,
        interest_rate: InterestRate,
    ) -> (Self, AccountEvent) {
        let account_id = Uuid::new_v4();
        let now = Utc::now();

        let event = AccountEvent::AccountRegistered {
            account_id,
            name: name.clone(),
            email: email.clone(),
            initial_balance,
            registered_at: now,
        };

        let account = Self {
            id: account_id,
            name,
            email,
            pin,
            balance: initial_balance,
            interest_rate,
            version: 1,
            created_at: Some(now),
            ..Self::default()
        };

        (account, event)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Compare the entered PIN and produce the login outcome event.
    ///
    /// A locked account is rejected before comparison and counts no attempt.
    pub fn attempt_login(&self, entered: &Pin, max_attempts: u32) -> Result<AccountEvent, LedgerError> {
        if self.locked {
            return Err(LedgerError::AccountLocked);
        }

        let now = Utc::now();
        if self.pin.matches(entered) {
            return Ok(AccountEvent::LoginSucceeded { logged_in_at: now });
        }

        let attempts = self.login_attempts.saturating_add(1);
        Ok(AccountEvent::LoginFailed {
            attempts,
            locked: attempts >= max_attempts,
            failed_at: now,
        })
    }

    // =========================================================================
    // Money movement
    // =========================================================================

    /// Deposit money into the account
    pub fn deposit(&self, amount: Decimal) -> Result<AccountEvent, LedgerError> {
        let amount = Amount::new(amount).map_err(|_| LedgerError::InvalidDepositAmount)?;
        let new_balance = self
            .balance
            .credit(&amount)
            .map_err(|_| LedgerError::InvalidDepositAmount)?;

        Ok(AccountEvent::MoneyDeposited {
            amount,
            new_balance,
            deposited_at: Utc::now(),
        })
    }

    /// Credit `balance * rate` as interest.
    ///
    /// The rate is checked before the balance, matching the order callers rely on.
    pub fn accrue_interest(&self, rate: Decimal) -> Result<AccountEvent, LedgerError> {
        let rate = InterestRate::new(rate).map_err(|_| LedgerError::InvalidInterestRate)?;

        if !self.balance.is_positive() {
            return Err(LedgerError::NoInterestAccrued);
        }

        // a positive balance always accrues, even when the product rounds to zero
        let interest = self
            .balance
            .interest_at(&rate)
            .map_err(|_| LedgerError::InvalidInterestRate)?;
        let new_balance = self
            .balance
            .accrue(&interest)
            .map_err(|_| LedgerError::InvalidInterestRate)?;

        Ok(AccountEvent::InterestApplied {
            rate,
            interest,
            new_balance,
            applied_at: Utc::now(),
        })
    }

    /// Debit side of a transfer
    pub fn send(&self, to: &Email, amount: Decimal, transfer_id: Uuid) -> Result<AccountEvent, LedgerError> {
        let amount = Amount::new(amount).map_err(|_| LedgerError::InvalidTransfer)?;

        if !self.balance.is_sufficient_for(&amount) {
            return Err(LedgerError::InvalidTransfer);
        }

        let new_balance = self
            .balance
            .debit(&amount)
            .map_err(|_| LedgerError::InvalidTransfer)?;

        Ok(AccountEvent::TransferSent {
            transfer_id,
            to: to.clone(),
            amount,
            new_balance,
            sent_at: Utc::now(),
        })
    }

    /// Credit side of a transfer
    pub fn receive(&self, from: &Email, amount: Decimal, transfer_id: Uuid) -> Result<AccountEvent, LedgerError> {
        let amount = Amount::new(amount).map_err(|_| LedgerError::InvalidTransfer)?;
        let new_balance = self
            .balance
            .credit(&amount)
            .map_err(|_| LedgerError::InvalidTransfer)?;

        Ok(AccountEvent::TransferReceived {
            transfer_id,
            from: from.clone(),
            amount,
            new_balance,
            received_at: Utc::now(),
        })
    }

    /// Withdraw money from the account
    pub fn withdraw(&self, amount: Decimal) -> Result<AccountEvent, LedgerError> {
        let amount = Amount::new(amount).map_err(|_| LedgerError::InvalidWithdrawal)?;

        if !self.balance.is_sufficient_for(&amount) {
            return Err(LedgerError::InvalidWithdrawal);
        }

        let new_balance = self
            .balance
            .debit(&amount)
            .map_err(|_| LedgerError::InvalidWithdrawal)?;

        Ok(AccountEvent::MoneyWithdrawn {
            amount,
            new_balance,
            withdrawn_at: Utc::now(),
        })
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn balance(&self) -> &Balance {
        &self.balance
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn login_attempts(&self) -> u32 {
        self.login_attempts
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn transactions(&self) -> &[String] {
        &self.transactions
    }

    pub fn interest_rate(&self) -> &InterestRate {
        &self.interest_rate
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Aggregate for Account {
    type Event = AccountEvent;

    fn aggregate_type() -> &'static str {
        "Account"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(mut self, event: Self::Event) -> Self {
        match event {
            AccountEvent::AccountRegistered {
                account_id,
                name,
                email,
                initial_balance,
                registered_at,
            } => {
                self.id = account_id;
                self.name = name;
                self.email = email;
                self.balance = initial_balance;
                self.created_at = Some(registered_at);
            }

            AccountEvent::LoginSucceeded { .. } => {
                self.logged_in = true;
                self.login_attempts = 0;
            }

            AccountEvent::LoginFailed { attempts, locked, .. } => {
                self.login_attempts = attempts;
                if locked {
                    self.locked = true;
                }
            }

            AccountEvent::MoneyDeposited { amount, new_balance, .. } => {
                self.balance = new_balance;
                self.transactions.push(format!("Deposited ${}", amount));
                self.notifications
                    .push(format!("Deposit successful. New balance: ${}", new_balance));
            }

            AccountEvent::InterestApplied { interest, new_balance, .. } => {
                self.balance = new_balance;
                self.transactions
                    .push(format!("Interest applied: ${}", interest));
                self.notifications.push(format!(
                    "Interest of ${} applied. New balance: ${}",
                    interest, new_balance
                ));
            }

            AccountEvent::TransferSent { to, amount, new_balance, .. } => {
                self.balance = new_balance;
                self.transactions.push(format!("Transferred ${} to {}", amount, to));
                self.notifications.push(format!(
                    "Transferred ${} to {}. New balance: ${}",
                    amount, to, new_balance
                ));
            }

            AccountEvent::TransferReceived { from, amount, new_balance, .. } => {
                self.balance = new_balance;
                self.transactions.push(format!("Received ${} from {}", amount, from));
                self.notifications.push(format!(
                    "Received ${} from {}. New balance: ${}",
                    amount, from, new_balance
                ));
            }

            AccountEvent::MoneyWithdrawn { amount, new_balance, .. } => {
                self.balance = new_balance;
                self.transactions.push(format!("Withdrew ${}", amount));
                self.notifications.push(format!(
                    "Withdrawal of ${} successful. New balance: ${}",
                    amount, new_balance
                ));
            }
        }

        self.version += 1;
        self
    }
}
