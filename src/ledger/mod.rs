//! Ledger module
//!
//! The account store and the wallet operations over it.

mod service;
mod shared;
mod store;

pub use service::Ledger;
pub use shared::SharedLedger;
pub use store::{AccountRepository, InMemoryAccountRepository};
