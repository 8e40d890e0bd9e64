//! Account domain model.
//!
//! An account holds a balance and an append-only ledger of [`Transaction`]s,
//! and is mutated only through `deposit`, `withdraw`, `apply_interest` and
//! [`transfer`]. The balance always equals the initial balance plus the net
//! effect of the ledger entries applied in order (transfer marker entries
//! excluded, since the funds movement is carried by their paired
//! withdraw/deposit entries).
//!
//! Everything here is synchronous and in-memory; persistence and access
//! serialization belong to the caller.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Amount;
use crate::model::{AccountId, Transaction, TxKind};

mod error;
pub use error::AccountError;

mod kind;
pub use kind::{AccountKind, CurrentConfig, DEFAULT_INTEREST_RATE, SavingsConfig};

/// A user account of one of three kinds: base, savings or current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default = "generate_account_id")]
    pub account_id: AccountId,
    pub owner: String,
    #[serde(default)]
    pub balance: Amount,
    /// Append-only ledger, in insertion order.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(flatten)]
    kind: AccountKind,
}

fn generate_account_id() -> AccountId {
    Uuid::new_v4().to_string()
}

impl Account {
    /// Create a base account with a generated id.
    pub fn new(owner: impl Into<String>, balance: Amount) -> Self {
        Self::with_kind(owner, balance, AccountKind::Account)
    }

    /// Create a savings account.
    pub fn savings(owner: impl Into<String>, balance: Amount, config: SavingsConfig) -> Self {
        Self::with_kind(owner, balance, config.into())
    }

    /// Create a current account.
    pub fn current(owner: impl Into<String>, balance: Amount, config: CurrentConfig) -> Self {
        Self::with_kind(owner, balance, config.into())
    }

    fn with_kind(owner: impl Into<String>, balance: Amount, kind: AccountKind) -> Self {
        Self {
            account_id: generate_account_id(),
            owner: owner.into(),
            balance,
            transactions: Vec::new(),
            kind,
        }
    }

    /// Replace the generated account id with an explicit one.
    pub fn with_id(mut self, account_id: impl Into<AccountId>) -> Self {
        self.account_id = account_id.into();
        self
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// Annual interest rate; `None` for non-savings kinds.
    pub fn interest_rate(&self) -> Option<Decimal> {
        match &self.kind {
            AccountKind::Savings { interest_rate, .. } => Some(*interest_rate),
            _ => None,
        }
    }

    /// When interest was last posted; `None` for non-savings kinds or if
    /// interest has never been posted.
    pub fn last_interest_applied(&self) -> Option<DateTime<Utc>> {
        match &self.kind {
            AccountKind::Savings {
                last_interest_applied,
                ..
            } => *last_interest_applied,
            _ => None,
        }
    }

    /// Credit `amount` to the balance and append a `deposit` entry.
    pub fn deposit(
        &mut self,
        amount: Amount,
        description: impl Into<String>,
    ) -> Result<Transaction, AccountError> {
        if !amount.is_positive() {
            return Err(AccountError::InvalidAmount(amount));
        }

        self.balance += amount;
        let tx = Transaction::new(TxKind::Deposit, amount, description);
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Debit `amount` from the balance and append a `withdraw` entry.
    ///
    /// The withdrawal floor is zero for base and savings accounts; a current
    /// account may go negative down to its overdraft limit.
    pub fn withdraw(
        &mut self,
        amount: Amount,
        description: impl Into<String>,
    ) -> Result<Transaction, AccountError> {
        if !amount.is_positive() {
            return Err(AccountError::InvalidAmount(amount));
        }

        let available = self.balance + self.kind.overdraft_headroom();
        if available < amount {
            return Err(AccountError::InsufficientFunds {
                account_id: self.account_id.clone(),
                available,
                requested: amount,
            });
        }

        self.balance -= amount;
        let tx = Transaction::new(TxKind::Withdraw, amount, description);
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Accrue `months` of interest on a savings account.
    ///
    /// `interest = balance * (interest_rate / 12) * months`. When the
    /// computed interest is not positive (zero balance, months <= 0) the
    /// call is a no-op and returns `Ok(None)`. Otherwise the balance grows
    /// by the unrounded interest while the posted ledger entry carries the
    /// value rounded to 2 decimal places; only the ledger entry is rounded.
    pub fn apply_interest(&mut self, months: i32) -> Result<Option<Transaction>, AccountError> {
        let AccountKind::Savings {
            interest_rate,
            last_interest_applied,
        } = &mut self.kind
        else {
            return Err(AccountError::InterestNotApplicable {
                account_id: self.account_id.clone(),
                acc_type: self.kind.as_str(),
            });
        };

        let monthly_rate = *interest_rate / Decimal::from(12);
        let interest = self.balance.value() * monthly_rate * Decimal::from(months);
        if interest <= Decimal::ZERO {
            return Ok(None);
        }

        self.balance += Amount::new(interest);
        *last_interest_applied = Some(Utc::now());

        let tx = Transaction::new(
            TxKind::Interest,
            Amount::new(interest).round_dp(2),
            format!("Interest for {months} month(s)"),
        );
        self.transactions.push(tx.clone());
        Ok(Some(tx))
    }

    /// Serialize to the plain attribute mapping used for persistence
    /// round-trips.
    pub fn to_record(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Rebuild an account from its attribute mapping.
    ///
    /// Missing optional attributes hydrate to their defaults; a missing
    /// `account_id` is generated.
    pub fn from_record(record: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(record)
    }
}

/// Move `amount` from `source` to `destination`.
///
/// The funds check is entirely delegated to `source.withdraw`, so current
/// account overdraft applies. On success each account gains two ledger
/// entries: the withdraw/deposit pair plus an explicit transfer marker.
/// The withdraw is fully applied before the deposit is attempted and there
/// is no rollback.
pub fn transfer(
    source: &mut Account,
    destination: &mut Account,
    amount: Amount,
) -> Result<(Transaction, Transaction), AccountError> {
    if source.account_id == destination.account_id {
        return Err(AccountError::SameAccount(source.account_id.clone()));
    }
    if !amount.is_positive() {
        return Err(AccountError::InvalidAmount(amount));
    }

    source.withdraw(amount, format!("Transfer to {}", destination.account_id))?;
    destination.deposit(amount, format!("Transfer from {}", source.account_id))?;

    let t_out = Transaction::new(
        TxKind::TransferOut,
        amount,
        format!("To {}", destination.account_id),
    );
    let t_in = Transaction::new(
        TxKind::TransferIn,
        amount,
        format!("From {}", source.account_id),
    );
    source.transactions.push(t_out.clone());
    destination.transactions.push(t_in.clone());

    Ok((t_out, t_in))
}
