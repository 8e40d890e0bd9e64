//! In-memory account registry.
//!
//! The bank is the thin collaborator around the account model: it keeps
//! accounts by id and dispatches [`Operation`]s onto them. It adds no
//! locking or versioning; callers embedding it in a concurrent environment
//! must serialize access themselves.

use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

use crate::Amount;
use crate::account::{Account, AccountError, transfer};
use crate::model::AccountId;

/// An operation to apply against the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Register a new account under its id.
    Open { account: Account },
    Deposit {
        account: AccountId,
        amount: Amount,
    },
    Withdraw {
        account: AccountId,
        amount: Amount,
    },
    /// Move funds between two registered accounts.
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
    /// Accrue interest on a registered savings account.
    ApplyInterest { account: AccountId, months: i32 },
}

/// Top-level error returned by [`Bank::apply`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BankError {
    #[error("account {0} not found")]
    NotFound(AccountId),

    #[error("account {0} already exists")]
    AlreadyExists(AccountId),

    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Registry of accounts keyed by account id.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: HashMap<AccountId, Account>,
}

/// Public API
impl Bank {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Register an account under its id.
    pub fn open(&mut self, account: Account) -> Result<AccountId, BankError> {
        if self.accounts.contains_key(&account.account_id) {
            return Err(BankError::AlreadyExists(account.account_id.clone()));
        }
        let account_id = account.account_id.clone();
        self.accounts.insert(account_id.clone(), account);
        Ok(account_id)
    }

    /// Return one registered account.
    pub fn get(&self, account_id: &str) -> Option<&Account> {
        self.accounts.get(account_id)
    }

    /// Return all registered accounts, in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts.values()
    }

    /// Apply every operation in the batch, skipping failures.
    pub fn run(&mut self, operations: impl IntoIterator<Item = Operation>) {
        for op in operations {
            // failures are logged by apply and must not stop the batch
            let _ = self.apply(op);
        }
    }

    /// Apply a single operation on top of the current registry state.
    pub fn apply(&mut self, op: Operation) -> Result<(), BankError> {
        match op {
            Operation::Open { account } => {
                let account_id = account.account_id.clone();
                let result = self.open(account).map(|_| ());
                Self::log_result("open", &account_id, None, &result);
                result
            }
            Operation::Deposit { account, amount } => {
                let result = self.apply_deposit(&account, amount);
                Self::log_result("deposit", &account, Some(amount), &result);
                result
            }
            Operation::Withdraw { account, amount } => {
                let result = self.apply_withdraw(&account, amount);
                Self::log_result("withdraw", &account, Some(amount), &result);
                result
            }
            Operation::Transfer { from, to, amount } => {
                let result = self.apply_transfer(&from, &to, amount);
                Self::log_result("transfer", &from, Some(amount), &result);
                result
            }
            Operation::ApplyInterest { account, months } => {
                let result = self.apply_interest(&account, months);
                Self::log_result("interest", &account, None, &result);
                result
            }
        }
    }
}

/// Private API
impl Bank {
    /// Small helper to log `apply` results
    fn log_result(op: &str, account: &str, amount: Option<Amount>, result: &Result<(), BankError>) {
        match (result, amount) {
            (Ok(()), Some(amt)) => {
                info!(account = %account, amount = %amt, "{op} applied");
            }
            (Ok(()), None) => {
                info!(account = %account, "{op} applied");
            }
            (Err(e), Some(amt)) => {
                info!(account = %account, amount = %amt, reason = %e, "{op} skipped");
            }
            (Err(e), None) => {
                info!(account = %account, reason = %e, "{op} skipped");
            }
        }
    }

    fn account_mut(&mut self, account_id: &str) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(account_id)
            .ok_or_else(|| BankError::NotFound(account_id.to_string()))
    }

    fn apply_deposit(&mut self, account_id: &str, amount: Amount) -> Result<(), BankError> {
        self.account_mut(account_id)?.deposit(amount, "")?;
        Ok(())
    }

    fn apply_withdraw(&mut self, account_id: &str, amount: Amount) -> Result<(), BankError> {
        self.account_mut(account_id)?.withdraw(amount, "")?;
        Ok(())
    }

    fn apply_interest(&mut self, account_id: &str, months: i32) -> Result<(), BankError> {
        self.account_mut(account_id)?.apply_interest(months)?;
        Ok(())
    }

    fn apply_transfer(&mut self, from: &str, to: &str, amount: Amount) -> Result<(), BankError> {
        if from == to {
            return Err(AccountError::SameAccount(from.to_string()).into());
        }

        // Take the source out of the map to borrow both accounts mutably;
        // it is always reinserted, whatever the transfer outcome.
        let mut source = self
            .accounts
            .remove(from)
            .ok_or_else(|| BankError::NotFound(from.to_string()))?;

        let result = match self.accounts.get_mut(to) {
            Some(destination) => transfer(&mut source, destination, amount)
                .map(|_| ())
                .map_err(BankError::from),
            None => Err(BankError::NotFound(to.to_string())),
        };

        self.accounts.insert(source.account_id.clone(), source);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{CurrentConfig, SavingsConfig};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    // test utils

    fn open_base(bank: &mut Bank, id: &str, balance: Decimal) {
        bank.open(Account::new("test", Amount::new(balance)).with_id(id))
            .unwrap();
    }

    fn deposit(account: &str, amount: Decimal) -> Operation {
        Operation::Deposit {
            account: account.to_string(),
            amount: Amount::new(amount),
        }
    }

    fn withdraw(account: &str, amount: Decimal) -> Operation {
        Operation::Withdraw {
            account: account.to_string(),
            amount: Amount::new(amount),
        }
    }

    fn transfer_op(from: &str, to: &str, amount: Decimal) -> Operation {
        Operation::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount: Amount::new(amount),
        }
    }

    #[test]
    fn new_bank_is_empty() {
        let bank = Bank::new();
        assert_eq!(bank.accounts().count(), 0);
    }

    #[test]
    fn open_and_get() {
        let mut bank = Bank::new();
        open_base(&mut bank, "alice", dec!(100));

        let account = bank.get("alice").unwrap();
        assert_eq!(account.balance, Amount::new(dec!(100)));
    }

    #[test]
    fn open_duplicate_id_fails() {
        let mut bank = Bank::new();
        open_base(&mut bank, "alice", dec!(100));

        let result = bank.open(Account::new("other", Amount::ZERO).with_id("alice"));
        assert_eq!(result, Err(BankError::AlreadyExists("alice".to_string())));

        // original account untouched
        assert_eq!(bank.get("alice").unwrap().balance, Amount::new(dec!(100)));
    }

    #[test]
    fn deposit_and_withdraw_ops_update_balance() {
        let mut bank = Bank::new();
        open_base(&mut bank, "alice", dec!(100));

        bank.apply(deposit("alice", dec!(50))).unwrap();
        bank.apply(withdraw("alice", dec!(30))).unwrap();

        let account = bank.get("alice").unwrap();
        assert_eq!(account.balance, Amount::new(dec!(120)));
        assert_eq!(account.transactions.len(), 2);
    }

    #[test]
    fn deposit_to_unknown_account_fails() {
        let mut bank = Bank::new();
        let result = bank.apply(deposit("ghost", dec!(50)));
        assert_eq!(result, Err(BankError::NotFound("ghost".to_string())));
    }

    #[test]
    fn withdraw_insufficient_funds_propagates() {
        let mut bank = Bank::new();
        open_base(&mut bank, "alice", dec!(10));

        let result = bank.apply(withdraw("alice", dec!(50)));
        assert!(matches!(
            result,
            Err(BankError::Account(AccountError::InsufficientFunds { .. }))
        ));
    }

    #[test]
    fn transfer_op_moves_funds() {
        let mut bank = Bank::new();
        open_base(&mut bank, "alice", dec!(200));
        open_base(&mut bank, "bob", dec!(50));

        bank.apply(transfer_op("alice", "bob", dec!(75))).unwrap();

        let alice = bank.get("alice").unwrap();
        let bob = bank.get("bob").unwrap();
        assert_eq!(alice.balance, Amount::new(dec!(125)));
        assert_eq!(bob.balance, Amount::new(dec!(125)));
        assert_eq!(alice.transactions.len(), 2);
        assert_eq!(bob.transactions.len(), 2);
    }

    #[test]
    fn transfer_op_to_unknown_destination_keeps_source_registered() {
        let mut bank = Bank::new();
        open_base(&mut bank, "alice", dec!(200));

        let result = bank.apply(transfer_op("alice", "ghost", dec!(75)));
        assert_eq!(result, Err(BankError::NotFound("ghost".to_string())));

        // source was reinserted untouched
        let alice = bank.get("alice").unwrap();
        assert_eq!(alice.balance, Amount::new(dec!(200)));
        assert!(alice.transactions.is_empty());
    }

    #[test]
    fn transfer_op_to_same_account_fails() {
        let mut bank = Bank::new();
        open_base(&mut bank, "alice", dec!(200));

        let result = bank.apply(transfer_op("alice", "alice", dec!(75)));
        assert_eq!(
            result,
            Err(BankError::Account(AccountError::SameAccount(
                "alice".to_string()
            )))
        );
        assert_eq!(bank.get("alice").unwrap().balance, Amount::new(dec!(200)));
    }

    #[test]
    fn interest_op_posts_to_savings() {
        let mut bank = Bank::new();
        bank.open(
            Account::savings(
                "test",
                Amount::new(dec!(1000)),
                SavingsConfig {
                    interest_rate: dec!(0.06),
                    ..Default::default()
                },
            )
            .with_id("save"),
        )
        .unwrap();

        bank.apply(Operation::ApplyInterest {
            account: "save".to_string(),
            months: 1,
        })
        .unwrap();

        assert_eq!(bank.get("save").unwrap().balance, Amount::new(dec!(1005)));
    }

    #[test]
    fn interest_op_on_current_account_fails() {
        let mut bank = Bank::new();
        bank.open(
            Account::current("test", Amount::new(dec!(1000)), CurrentConfig::default())
                .with_id("cur"),
        )
        .unwrap();

        let result = bank.apply(Operation::ApplyInterest {
            account: "cur".to_string(),
            months: 1,
        });
        assert!(matches!(
            result,
            Err(BankError::Account(AccountError::InterestNotApplicable { .. }))
        ));
    }

    #[test]
    fn run_skips_failed_operations_and_continues() {
        let mut bank = Bank::new();
        open_base(&mut bank, "alice", dec!(0));

        bank.run([
            deposit("alice", dec!(100)),
            withdraw("alice", dec!(200)), // should fail with insufficient funds
            deposit("alice", dec!(50)),   // should still process
        ]);

        // 100 + 50 with the withdrawal skipped
        assert_eq!(bank.get("alice").unwrap().balance, Amount::new(dec!(150)));
    }
}
