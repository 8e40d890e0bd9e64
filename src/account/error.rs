//! Error types for account operations.

use thiserror::Error;

use crate::Amount;
use crate::model::AccountId;

/// Errors returned by account operations and [`transfer`](super::transfer).
///
/// All variants are recoverable: the caller decides whether to surface them
/// and may re-invoke with corrected input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccountError {
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Amount),

    #[error("insufficient funds in account {account_id}: available {available}, requested {requested}")]
    InsufficientFunds {
        account_id: AccountId,
        available: Amount,
        requested: Amount,
    },

    #[error("cannot transfer from account {0} to itself")]
    SameAccount(AccountId),

    #[error("interest is not applicable to {acc_type} account {account_id}")]
    InterestNotApplicable {
        account_id: AccountId,
        acc_type: &'static str,
    },
}
