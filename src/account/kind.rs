//! Account kinds and their construction parameters.
//!
//! The three kinds share the deposit/withdraw/serialization surface; kind
//! specific behavior (interest, overdraft) is dispatched on this tag.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Amount;

/// Annual interest rate assigned to savings accounts when none is given.
pub const DEFAULT_INTEREST_RATE: Decimal = dec!(0.04);

/// Kind tag and kind-specific state of an account.
///
/// Serialized flattened into the account mapping under the `acc_type` key,
/// so a savings account round-trips as
/// `{"acc_type": "savings", "interest_rate": "0.04", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "acc_type", rename_all = "lowercase")]
pub enum AccountKind {
    /// Base account: no overdraft, no interest.
    Account,
    /// Savings account: accrues interest, floor stays at zero.
    Savings {
        #[serde(default = "default_interest_rate")]
        interest_rate: Decimal,
        /// Set each time interest is actually posted.
        #[serde(default)]
        last_interest_applied: Option<DateTime<Utc>>,
    },
    /// Current account: balance may go negative down to the overdraft limit.
    Current {
        #[serde(default)]
        overdraft_limit: Amount,
    },
}

fn default_interest_rate() -> Decimal {
    DEFAULT_INTEREST_RATE
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Account => "account",
            AccountKind::Savings { .. } => "savings",
            AccountKind::Current { .. } => "current",
        }
    }

    /// How far below zero a withdrawal may take the balance.
    pub fn overdraft_headroom(&self) -> Amount {
        match self {
            AccountKind::Current { overdraft_limit } => *overdraft_limit,
            _ => Amount::ZERO,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recognized fields for constructing a savings account.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsConfig {
    /// Annual rate as a decimal fraction, e.g. 0.04 = 4%.
    pub interest_rate: Decimal,
    pub last_interest_applied: Option<DateTime<Utc>>,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            interest_rate: DEFAULT_INTEREST_RATE,
            last_interest_applied: None,
        }
    }
}

impl From<SavingsConfig> for AccountKind {
    fn from(config: SavingsConfig) -> Self {
        AccountKind::Savings {
            interest_rate: config.interest_rate,
            last_interest_applied: config.last_interest_applied,
        }
    }
}

/// Recognized fields for constructing a current account.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrentConfig {
    pub overdraft_limit: Amount,
}

impl From<CurrentConfig> for AccountKind {
    fn from(config: CurrentConfig) -> Self {
        AccountKind::Current {
            overdraft_limit: config.overdraft_limit,
        }
    }
}
