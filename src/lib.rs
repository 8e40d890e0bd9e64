pub mod account;
pub mod amount;
pub mod bank;
pub mod csv;
pub mod model;

pub use account::{Account, AccountError, AccountKind, CurrentConfig, SavingsConfig, transfer};
pub use amount::Amount;
pub use bank::{Bank, BankError, Operation};
pub use model::{AccountId, Transaction, TxKind};
