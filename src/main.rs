use std::env;

use bank_eng::Bank;
use bank_eng::csv::{read_operations, write_accounts};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .expect("usage: bank-eng <operations.csv>");

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let mut bank = Bank::new();
    let operations = read_operations(&path).filter_map(|result| match result {
        Ok(op) => Some(op),
        Err(e) => {
            warn!("{e}");
            None
        }
    });
    bank.run(operations);

    write_accounts(bank.accounts());
}
