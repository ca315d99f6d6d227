//! Wallet Ledger CLI
//!
//! Small driver for the ledger library: registers an account, deposits into
//! it, optionally pays from it, prints the result, and optionally saves the
//! ledger to disk.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --phone +992000000001 --deposit 100 --pay 40 --category food
//! cargo run -- --import-dir state --deposit 5 --export-dir state
//! RUST_LOG=debug cargo run -- --accounts-file accounts.txt
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Any ledger or file error

use log::info;
use std::process;
use wallet_ledger::cli::{self, CliArgs};
use wallet_ledger::{Ledger, LedgerError, Result};

fn main() {
    env_logger::init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", describe(&e));
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let config = args.to_aggregate_config();
    let mut ledger = Ledger::new();

    if let Some(dir) = &args.import_dir {
        let summary = ledger.import(dir)?;
        info!(
            "Imported {} new and {} updated entities from {}",
            summary.inserted,
            summary.updated,
            dir.display()
        );
    }

    let account_id = match ledger.accounts().iter().find(|a| a.phone == args.phone) {
        Some(account) => account.id,
        None => ledger.register_account(args.phone.as_str())?.id,
    };

    ledger.deposit(account_id, args.deposit)?;

    if let Some(amount) = args.pay {
        let payment = ledger.pay(account_id, amount, args.category.as_str())?;
        println!("Payment {} of {} ({})", payment.id, payment.amount, payment.category);
    }

    let account = ledger.find_account_by_id(account_id)?;
    println!("Account {} ({}): balance {}", account.id, account.phone, account.balance);
    println!(
        "Payments total: {} ({} workers)",
        ledger.sum_payments(config.workers)?,
        config.workers
    );

    if let Some(dir) = &args.export_dir {
        ledger.export(dir)?;
    }

    if let Some(path) = &args.accounts_file {
        ledger.export_to_file(path)?;
    }

    Ok(())
}

/// Human-readable message for the errors a user is most likely to hit
fn describe(error: &LedgerError) -> String {
    match error {
        LedgerError::AmountMustBePositive { .. } => "Amount must be positive".to_string(),
        LedgerError::AccountNotFound { account_id } => {
            format!("Account {} was not found", account_id)
        }
        LedgerError::NotEnoughBalance {
            balance, requested, ..
        } => format!(
            "Not enough money: balance is {}, payment needs {}",
            balance, requested
        ),
        other => other.to_string(),
    }
}
