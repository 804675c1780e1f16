//! Ledger Service
//!
//! The wallet operations. Each one validates against the repository, builds
//! the events for every affected account, and only then applies and saves
//! them, so a rejected call leaves the store untouched.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::aggregate::{Account, Aggregate};
use crate::config::LedgerConfig;
use crate::domain::{format_money, AccountEvent, Balance, Email, Pin};
use crate::error::{LedgerError, LedgerResult};
use crate::status::BalanceInfo;

use super::store::{AccountRepository, InMemoryAccountRepository};

/// Wallet ledger over an injected account repository
#[derive(Debug, Clone)]
pub struct Ledger<R = InMemoryAccountRepository> {
    repository: R,
    config: LedgerConfig,
}

impl Ledger<InMemoryAccountRepository> {
    /// Empty in-memory ledger with default configuration
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self::with_repository(InMemoryAccountRepository::new(), config)
    }
}

impl Default for Ledger<InMemoryAccountRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AccountRepository> Ledger<R> {
    pub fn with_repository(repository: R, config: LedgerConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new account.
    ///
    /// Format checks run before the duplicate check, so a malformed request for
    /// an existing email reports invalid input.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        pin: &str,
        initial_balance: Decimal,
    ) -> LedgerResult<String> {
        let parsed_email = Email::parse(email);
        let parsed_pin = Pin::parse(pin);
        let balance = Balance::new(initial_balance).ok();

        let (email, pin, balance) = match (parsed_email, parsed_pin, balance) {
            (Some(email), Some(pin), Some(balance)) if !name.is_empty() => (email, pin, balance),
            _ => {
                tracing::debug!("Registration rejected: invalid input");
                return Err(LedgerError::InvalidRegistration);
            }
        };

        if self.repository.contains(email.as_str()) {
            tracing::debug!(email = %email, "Registration rejected: duplicate email");
            return Err(LedgerError::UserAlreadyExists);
        }

        let (account, event) = Account::create(
            name.to_string(),
            email,
            pin,
            balance,
            self.config.default_interest_rate,
        );

        tracing::info!(
            account_id = %account.id(),
            email = %account.email(),
            event = event.event_type(),
            "Account registered"
        );

        self.repository.save(account);

        Ok(format!(
            "User {} registered successfully with balance ${}",
            name, balance
        ))
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check the PIN and log the user in.
    ///
    /// Order: format, existence, lock, comparison. A wrong PIN is recorded on
    /// the account before the error is returned.
    pub fn authenticate(&mut self, email: &str, entered_pin: &str) -> LedgerResult<String> {
        let (email, entered) = match (Email::parse(email), Pin::parse(entered_pin)) {
            (Some(email), Some(pin)) => (email, pin),
            _ => return Err(LedgerError::InvalidCredentialsFormat),
        };

        let account = self
            .repository
            .find(email.as_str())
            .ok_or(LedgerError::UserNotFound)?;

        let event = account.attempt_login(&entered, self.config.max_login_attempts)?;
        let result = match &event {
            AccountEvent::LoginFailed { attempts, locked: true, .. } => {
                tracing::warn!(email = %email, attempts, "Account locked after repeated PIN failures");
                Err(LedgerError::LockedOut)
            }
            AccountEvent::LoginFailed { attempts, .. } => {
                tracing::warn!(email = %email, attempts, "Incorrect PIN");
                Err(LedgerError::IncorrectPin { attempts: *attempts })
            }
            _ => {
                tracing::info!(email = %email, "Login successful");
                Ok("Login successful.".to_string())
            }
        };

        let account = account.clone().apply(event);
        self.repository.save(account);
        result
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current balance, a copy of the transaction history and the stored rate
    pub fn view_balance(&self, email: &str) -> LedgerResult<BalanceInfo> {
        let account = self.logged_in_account(email, LedgerError::AccessDenied)?;

        Ok(BalanceInfo {
            balance: account.balance().value(),
            transactions: account.transactions().to_vec(),
            interest_rate: account.interest_rate().value(),
            message: "Balance retrieved successfully.".to_string(),
        })
    }

    /// Copy of the account's notifications
    pub fn notifications(&self, email: &str) -> LedgerResult<Vec<String>> {
        let account = self.logged_in_account(email, LedgerError::AccessDenied)?;
        Ok(account.notifications().to_vec())
    }

    pub fn account(&self, email: &str) -> Option<&Account> {
        self.repository.find(email)
    }

    /// Sum of all balances in the store
    pub fn total_balance(&self) -> Decimal {
        self.repository
            .accounts()
            .iter()
            .map(|account| account.balance().value())
            .sum()
    }

    /// Serialized image of every account, for before/after comparison
    pub fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self.repository.accounts())
    }

    // =========================================================================
    // Money movement
    // =========================================================================

    pub fn deposit(&mut self, email: &str, amount: Decimal) -> LedgerResult<String> {
        let account = self.logged_in_account(email, LedgerError::NotLoggedIn)?;
        let event = account.deposit(amount).inspect_err(|e| {
            tracing::debug!(email, %amount, "Deposit rejected: {}", e);
        })?;

        let account = account.clone().apply(event);
        tracing::info!(email, %amount, balance = %account.balance(), "Deposit applied");
        self.repository.save(account);

        Ok(format!("Deposited ${} successfully.", format_money(amount)))
    }

    /// Credit interest at `rate` (0 < rate <= 1) on a positive balance
    pub fn apply_interest(&mut self, email: &str, rate: Decimal) -> LedgerResult<String> {
        let account = self.logged_in_account(email, LedgerError::NotLoggedIn)?;
        let event = account.accrue_interest(rate).inspect_err(|e| {
            tracing::debug!(email, %rate, "Interest rejected: {}", e);
        })?;

        let updated = account.clone().apply(event);
        let interest = updated.balance().value() - account.balance().value();
        tracing::info!(email, %rate, %interest, balance = %updated.balance(), "Interest applied");
        self.repository.save(updated);

        Ok(format!("Interest of ${} applied.", format_money(interest)))
    }

    /// Move `amount` from sender to receiver, all or nothing
    pub fn transfer(
        &mut self,
        sender_email: &str,
        receiver_email: &str,
        amount: Decimal,
    ) -> LedgerResult<String> {
        let (sender, receiver) = match (
            self.repository.find(sender_email),
            self.repository.find(receiver_email),
        ) {
            (Some(sender), Some(receiver)) => (sender, receiver),
            _ => return Err(LedgerError::PartyNotFound),
        };

        if sender_email == receiver_email {
            return Err(LedgerError::SelfTransfer);
        }

        if !sender.is_logged_in() || !receiver.is_logged_in() {
            return Err(LedgerError::PartiesNotLoggedIn);
        }

        let transfer_id = Uuid::new_v4();
        let debit_event = sender
            .send(receiver.email(), amount, transfer_id)
            .inspect_err(|e| {
                tracing::debug!(sender_email, receiver_email, %amount, "Transfer rejected: {}", e);
            })?;
        let credit_event = receiver.receive(sender.email(), amount, transfer_id)?;

        let sender = sender.clone().apply(debit_event);
        let receiver = receiver.clone().apply(credit_event);

        tracing::info!(
            %transfer_id,
            sender_email,
            receiver_email,
            %amount,
            "Transfer completed"
        );

        self.repository.save(sender);
        self.repository.save(receiver);

        Ok(format!("Transferred ${} successfully.", format_money(amount)))
    }

    pub fn withdraw(&mut self, email: &str, amount: Decimal) -> LedgerResult<String> {
        let account = self.logged_in_account(email, LedgerError::NotLoggedIn)?;
        let event = account.withdraw(amount).inspect_err(|e| {
            tracing::debug!(email, %amount, "Withdrawal rejected: {}", e);
        })?;

        let account = account.clone().apply(event);
        tracing::info!(email, %amount, balance = %account.balance(), "Withdrawal applied");
        self.repository.save(account);

        Ok(format!("Withdrew ${} successfully.", format_money(amount)))
    }

    // Existence first, then login state.
    fn logged_in_account(&self, email: &str, not_logged_in: LedgerError) -> LedgerResult<&Account> {
        let account = self
            .repository
            .find(email)
            .ok_or(LedgerError::UserNotFound)?;

        if !account.is_logged_in() {
            return Err(not_logged_in);
        }
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ledger_with_alice() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .register("Alice", "alice@example.com", "1234", dec!(100))
            .unwrap();
        ledger
    }

    #[test]
    fn test_register_message() {
        let mut ledger = Ledger::new();
        let message = ledger
            .register("Alice", "alice@example.com", "1234", dec!(3204.93135))
            .unwrap();
        assert_eq!(message, "User Alice registered successfully with balance $3204.93");
    }

    #[test]
    fn test_register_invalid_input_beats_duplicate() {
        let mut ledger = ledger_with_alice();
        let result = ledger.register("Alice", "alice@example.com", "12", dec!(10));
        assert_eq!(result, Err(LedgerError::InvalidRegistration));
    }

    #[test]
    fn test_authenticate_order() {
        let mut ledger = ledger_with_alice();

        // malformed pin for an unknown user reports the format error
        assert_eq!(
            ledger.authenticate("nobody@example.com", "12x4"),
            Err(LedgerError::InvalidCredentialsFormat)
        );
        assert_eq!(
            ledger.authenticate("nobody@example.com", "1234"),
            Err(LedgerError::UserNotFound)
        );
        assert_eq!(
            ledger.authenticate("alice@example.com", "1111"),
            Err(LedgerError::IncorrectPin { attempts: 1 })
        );
        assert_eq!(
            ledger.authenticate("alice@example.com", "1234"),
            Ok("Login successful.".to_string())
        );
    }

    #[test]
    fn test_configured_attempt_threshold() {
        let config = LedgerConfig {
            max_login_attempts: 2,
            ..LedgerConfig::default()
        };
        let mut ledger = Ledger::with_config(config);
        ledger.register("Bob", "bob@example.com", "4321", dec!(0)).unwrap();

        assert!(ledger.authenticate("bob@example.com", "0000").is_err());
        assert_eq!(
            ledger.authenticate("bob@example.com", "0000"),
            Err(LedgerError::LockedOut)
        );
        assert_eq!(
            ledger.authenticate("bob@example.com", "4321"),
            Err(LedgerError::AccountLocked)
        );
    }

    #[test]
    fn test_operations_require_login() {
        let mut ledger = ledger_with_alice();
        assert_eq!(ledger.deposit("alice@example.com", dec!(5)), Err(LedgerError::NotLoggedIn));
        assert_eq!(
            ledger.view_balance("alice@example.com"),
            Err(LedgerError::AccessDenied)
        );
        assert_eq!(ledger.deposit("ghost@example.com", dec!(5)), Err(LedgerError::UserNotFound));
    }

    #[test]
    fn test_interest_message() {
        let mut ledger = ledger_with_alice();
        ledger.authenticate("alice@example.com", "1234").unwrap();

        let message = ledger.apply_interest("alice@example.com", dec!(0.05)).unwrap();
        assert_eq!(message, "Interest of $5.00 applied.");
        assert_eq!(ledger.total_balance(), dec!(105));
    }

    #[test]
    fn test_notifications_copy() {
        let mut ledger = ledger_with_alice();
        ledger.authenticate("alice@example.com", "1234").unwrap();
        ledger.deposit("alice@example.com", dec!(1)).unwrap();

        let mut notes = ledger.notifications("alice@example.com").unwrap();
        notes.push("tampered".to_string());

        assert_eq!(
            ledger.notifications("alice@example.com").unwrap(),
            vec!["Deposit successful. New balance: $101.00".to_string()]
        );
    }
}
