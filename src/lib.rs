//! walletLedger Library
//!
//! In-memory digital wallet: registration, PIN login with lockout, balance
//! views, deposits, interest, transfers and withdrawals.

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod domain;
pub mod ledger;
pub mod status;
mod error;

pub use config::LedgerConfig;
pub use error::{ErrorKind, LedgerError, LedgerResult};
pub use domain::{Amount, AmountError, Balance, InterestRate, AccountEvent};
pub use ledger::{AccountRepository, InMemoryAccountRepository, Ledger, SharedLedger};
pub use status::{BalanceInfo, OperationStatus};
pub use commands::{CommandReply, LedgerCommand};
