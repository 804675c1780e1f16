//! Command definitions
//!
//! Commands represent requests arriving from outside the process. Amounts and
//! rates travel as strings and are parsed here, so non-numeric input is
//! rejected with a format error before any account is looked at.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::parse_decimal;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{AccountRepository, Ledger};
use crate::status::{BalanceInfo, OperationStatus};

/// A single ledger request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerCommand {
    Register {
        name: String,
        email: String,
        pin: String,
        initial_balance: String,
    },
    Authenticate {
        email: String,
        pin: String,
    },
    ViewBalance {
        email: String,
    },
    Deposit {
        email: String,
        amount: String,
    },
    ApplyInterest {
        email: String,
        rate: String,
    },
    Transfer {
        sender_email: String,
        receiver_email: String,
        amount: String,
    },
    Withdraw {
        email: String,
        amount: String,
    },
}

impl LedgerCommand {
    /// Operation name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            LedgerCommand::Register { .. } => "register",
            LedgerCommand::Authenticate { .. } => "authenticate",
            LedgerCommand::ViewBalance { .. } => "view_balance",
            LedgerCommand::Deposit { .. } => "deposit",
            LedgerCommand::ApplyInterest { .. } => "apply_interest",
            LedgerCommand::Transfer { .. } => "transfer",
            LedgerCommand::Withdraw { .. } => "withdraw",
        }
    }
}

/// Reply to a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandReply {
    // listed first: a balance reply is also a valid status shape
    Balance {
        success: bool,
        #[serde(flatten)]
        info: BalanceInfo,
    },
    Status(OperationStatus),
}

impl CommandReply {
    pub fn success(&self) -> bool {
        match self {
            CommandReply::Balance { success, .. } => *success,
            CommandReply::Status(status) => status.success,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CommandReply::Balance { info, .. } => &info.message,
            CommandReply::Status(status) => &status.message,
        }
    }
}

fn numeric(raw: &str) -> LedgerResult<Decimal> {
    parse_decimal(raw).map_err(|_| LedgerError::InvalidNumber(raw.to_string()))
}

impl<R: AccountRepository> Ledger<R> {
    /// Parse and run a command
    pub fn execute(&mut self, command: LedgerCommand) -> CommandReply {
        let op = command.name();

        let reply = match command {
            LedgerCommand::Register {
                name,
                email,
                pin,
                initial_balance,
            } => {
                // a non-numeric balance is invalid registration input
                let result = match parse_decimal(&initial_balance) {
                    Ok(balance) => self.register(&name, &email, &pin, balance),
                    Err(_) => Err(LedgerError::InvalidRegistration),
                };
                CommandReply::Status(result.into())
            }
            LedgerCommand::Authenticate { email, pin } => {
                CommandReply::Status(self.authenticate(&email, &pin).into())
            }
            LedgerCommand::ViewBalance { email } => {
                let result = self.view_balance(&email);
                CommandReply::Balance {
                    success: result.is_ok(),
                    info: result.into(),
                }
            }
            LedgerCommand::Deposit { email, amount } => {
                let result = numeric(&amount).and_then(|amount| self.deposit(&email, amount));
                CommandReply::Status(result.into())
            }
            LedgerCommand::ApplyInterest { email, rate } => {
                let result = numeric(&rate).and_then(|rate| self.apply_interest(&email, rate));
                CommandReply::Status(result.into())
            }
            LedgerCommand::Transfer {
                sender_email,
                receiver_email,
                amount,
            } => {
                let result = numeric(&amount)
                    .and_then(|amount| self.transfer(&sender_email, &receiver_email, amount));
                CommandReply::Status(result.into())
            }
            LedgerCommand::Withdraw { email, amount } => {
                let result = numeric(&amount).and_then(|amount| self.withdraw(&email, amount));
                CommandReply::Status(result.into())
            }
        };

        tracing::debug!(op, success = reply.success(), "Command executed");
        reply
    }
}
