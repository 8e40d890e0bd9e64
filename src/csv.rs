use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::account::{Account, CurrentConfig, SavingsConfig};
use crate::bank::Operation;
use crate::{AccountId, Amount};

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized operation '{op}'")]
    UnrecognizedOp { line: usize, op: String },

    #[error("line {line}: unrecognized account kind '{kind}'")]
    UnrecognizedKind { line: usize, kind: String },

    #[error("line {line}: {op} missing {field}")]
    MissingField {
        line: usize,
        op: String,
        field: &'static str,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    op: String,
    account: AccountId,
    owner: Option<String>,
    kind: Option<String>,
    to: Option<AccountId>,
    amount: Option<Decimal>,
    months: Option<i32>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    account: String,
    owner: String,
    kind: String,
    balance: String,
    transactions: usize,
}

/// Read operations from a csv file
pub fn read_operations(
    path: impl AsRef<Path>,
) -> impl Iterator<Item = Result<Operation, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            parse_row(line, row)
        })
}

fn parse_row(line: usize, row: InputRow) -> Result<Operation, CsvError> {
    let missing = |op: &str, field: &'static str| CsvError::MissingField {
        line,
        op: op.to_string(),
        field,
    };

    match row.op.as_str() {
        "open" => {
            let owner = row.owner.ok_or_else(|| missing("open", "owner"))?;
            let balance = Amount::new(row.amount.unwrap_or_default());
            let account = match row.kind.as_deref().unwrap_or("account") {
                "account" => Account::new(owner, balance),
                "savings" => Account::savings(owner, balance, SavingsConfig::default()),
                "current" => Account::current(owner, balance, CurrentConfig::default()),
                other => {
                    return Err(CsvError::UnrecognizedKind {
                        line,
                        kind: other.to_string(),
                    });
                }
            };
            Ok(Operation::Open {
                account: account.with_id(row.account),
            })
        }
        "deposit" => {
            let amount = row.amount.ok_or_else(|| missing("deposit", "amount"))?;
            Ok(Operation::Deposit {
                account: row.account,
                amount: Amount::new(amount),
            })
        }
        "withdraw" => {
            let amount = row.amount.ok_or_else(|| missing("withdraw", "amount"))?;
            Ok(Operation::Withdraw {
                account: row.account,
                amount: Amount::new(amount),
            })
        }
        "transfer" => {
            let to = row.to.ok_or_else(|| missing("transfer", "to"))?;
            let amount = row.amount.ok_or_else(|| missing("transfer", "amount"))?;
            Ok(Operation::Transfer {
                from: row.account,
                to,
                amount: Amount::new(amount),
            })
        }
        "interest" => Ok(Operation::ApplyInterest {
            account: row.account,
            months: row.months.unwrap_or(1),
        }),
        other => Err(CsvError::UnrecognizedOp {
            line,
            op: other.to_string(),
        }),
    }
}

/// write account summaries to stdout in csv format
pub fn write_accounts<'a>(accounts: impl IntoIterator<Item = &'a Account>) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    for account in accounts {
        let row = OutputRow {
            account: account.account_id.clone(),
            owner: account.owner.clone(),
            kind: account.kind().as_str().to_string(),
            balance: account.balance.to_string(),
            transactions: account.transactions.len(),
        };
        writer.serialize(&row).expect("failed to write csv row");
    }

    writer.flush().expect("failed to flush csv writer");
}
