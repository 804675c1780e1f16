//! Configuration module
//!
//! Loads ledger configuration from environment variables.

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::InterestRate;

/// Default interest rate assigned to new accounts
pub const DEFAULT_INTEREST_RATE: &str = "0.05";

/// Failed PIN attempts before an account locks
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 5;

/// Ledger configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Interest rate stored on every newly registered account
    pub default_interest_rate: InterestRate,

    /// Consecutive wrong PINs that lock an account
    pub max_login_attempts: u32,
}

impl LedgerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let default_interest_rate = env::var("WALLET_DEFAULT_INTEREST_RATE")
            .unwrap_or_else(|_| DEFAULT_INTEREST_RATE.to_string());
        let default_interest_rate = Decimal::from_str(default_interest_rate.trim())
            .ok()
            .and_then(|rate| InterestRate::new(rate).ok())
            .ok_or(ConfigError::InvalidValue("WALLET_DEFAULT_INTEREST_RATE"))?;

        let max_login_attempts: u32 = env::var("WALLET_MAX_LOGIN_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_LOGIN_ATTEMPTS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("WALLET_MAX_LOGIN_ATTEMPTS"))?;

        if max_login_attempts == 0 {
            return Err(ConfigError::InvalidValue("WALLET_MAX_LOGIN_ATTEMPTS"));
        }

        Ok(Self {
            default_interest_rate,
            max_login_attempts,
        })
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_interest_rate: InterestRate::default(),
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert_eq!(config.default_interest_rate.value(), dec!(0.05));
        assert_eq!(config.max_login_attempts, 5);
    }
}
