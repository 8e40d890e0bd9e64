use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed decimal money amount.
///
/// Backed by `rust_decimal::Decimal` for exact financial arithmetic.
/// Negative values are allowed: a current account may run a negative
/// balance within its overdraft limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// The inner decimal value.
    pub const fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Round to `dp` decimal places, midpoint-to-nearest-even.
    /// Used when posting interest to the ledger.
    pub fn round_dp(&self, dp: u32) -> Self {
        Amount(self.0.round_dp(dp))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
