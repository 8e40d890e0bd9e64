//! Core domain types for the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::Amount;

/// Account identifier. Generated as a uuid when not supplied by the caller.
pub type AccountId = String;

/// The kind of a ledger entry.
///
/// `TransferIn`/`TransferOut` entries are always created in pairs, on top of
/// the `Deposit`/`Withdraw` entries the transfer itself produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Deposit,
    Withdraw,
    TransferIn,
    TransferOut,
    Interest,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Deposit => "deposit",
            TxKind::Withdraw => "withdraw",
            TxKind::TransferIn => "transfer_in",
            TxKind::TransferOut => "transfer_out",
            TxKind::Interest => "interest",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable ledger entry.
///
/// Created only as a side effect of an account operation and never mutated
/// or removed afterwards. The owning account stores its entries in insertion
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TxKind,
    pub amount: Amount,
    #[serde(default)]
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create an entry stamped with a fresh id and the current time.
    pub fn new(kind: TxKind, amount: Amount, description: impl Into<String>) -> Self {
        Self::with_timestamp(kind, amount, description, Utc::now())
    }

    /// Create an entry with an explicit timestamp.
    pub fn with_timestamp(
        kind: TxKind,
        amount: Amount,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            description: description.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_stamps_fields() {
        let tx = Transaction::new(TxKind::Deposit, Amount::new(dec!(50)), "salary");
        assert_eq!(tx.kind, TxKind::Deposit);
        assert_eq!(tx.amount, Amount::new(dec!(50)));
        assert_eq!(tx.description, "salary");
        assert!(!tx.id.is_nil());
    }

    #[test]
    fn ids_are_unique() {
        let a = Transaction::new(TxKind::Deposit, Amount::new(dec!(1)), "");
        let b = Transaction::new(TxKind::Deposit, Amount::new(dec!(1)), "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn with_timestamp_preserves_explicit_time() {
        let when = "2024-01-15T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let tx = Transaction::with_timestamp(TxKind::Interest, Amount::new(dec!(5)), "", when);
        assert_eq!(tx.timestamp, when);
    }

    #[test]
    fn kind_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&TxKind::TransferOut).unwrap(),
            "\"transfer_out\""
        );
        assert_eq!(
            serde_json::to_string(&TxKind::TransferIn).unwrap(),
            "\"transfer_in\""
        );
        assert_eq!(serde_json::to_string(&TxKind::Interest).unwrap(), "\"interest\"");
    }

    #[test]
    fn kind_as_str_matches_serde() {
        for kind in [
            TxKind::Deposit,
            TxKind::Withdraw,
            TxKind::TransferIn,
            TxKind::TransferOut,
            TxKind::Interest,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn transaction_round_trip() {
        let tx = Transaction::new(TxKind::Withdraw, Amount::new(dec!(25.50)), "rent");
        let json = serde_json::to_string(&tx).unwrap();
        let parsed: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tx);
    }
}
