//! Domain module
//!
//! Core domain types: validated money, credentials and account events.

pub mod amount;
pub mod credentials;
pub mod events;

pub use amount::{format_money, parse_decimal, Amount, AmountError, Balance, InterestRate};
pub use credentials::{valid_email, valid_pin, Email, Pin};
pub use events::AccountEvent;
