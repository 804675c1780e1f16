//! Shared Ledger
//!
//! Cloneable handle for concurrent callers. Every operation runs under one
//! lock, so read-then-write sequences (balance checks, attempt counting,
//! transfers touching two accounts) never interleave.

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::commands::{CommandReply, LedgerCommand};
use crate::error::LedgerResult;
use crate::status::BalanceInfo;

use super::service::Ledger;
use super::store::{AccountRepository, InMemoryAccountRepository};

/// Thread-safe ledger handle
#[derive(Debug)]
pub struct SharedLedger<R = InMemoryAccountRepository> {
    inner: Arc<Mutex<Ledger<R>>>,
}

impl<R> Clone for SharedLedger<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: AccountRepository> SharedLedger<R> {
    pub fn new(ledger: Ledger<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub fn register(
        &self,
        name: &str,
        email: &str,
        pin: &str,
        initial_balance: Decimal,
    ) -> LedgerResult<String> {
        self.inner.lock().register(name, email, pin, initial_balance)
    }

    pub fn authenticate(&self, email: &str, entered_pin: &str) -> LedgerResult<String> {
        self.inner.lock().authenticate(email, entered_pin)
    }

    pub fn view_balance(&self, email: &str) -> LedgerResult<BalanceInfo> {
        self.inner.lock().view_balance(email)
    }

    pub fn deposit(&self, email: &str, amount: Decimal) -> LedgerResult<String> {
        self.inner.lock().deposit(email, amount)
    }

    pub fn apply_interest(&self, email: &str, rate: Decimal) -> LedgerResult<String> {
        self.inner.lock().apply_interest(email, rate)
    }

    pub fn transfer(
        &self,
        sender_email: &str,
        receiver_email: &str,
        amount: Decimal,
    ) -> LedgerResult<String> {
        self.inner
            .lock()
            .transfer(sender_email, receiver_email, amount)
    }

    pub fn withdraw(&self, email: &str, amount: Decimal) -> LedgerResult<String> {
        self.inner.lock().withdraw(email, amount)
    }

    pub fn execute(&self, command: LedgerCommand) -> CommandReply {
        self.inner.lock().execute(command)
    }

    pub fn total_balance(&self) -> Decimal {
        self.inner.lock().total_balance()
    }

    /// Run a closure with exclusive access to the ledger
    pub fn with_ledger<T>(&self, f: impl FnOnce(&mut Ledger<R>) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
