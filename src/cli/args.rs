use crate::aggregate::AggregateConfig;
use crate::types::Money;
use clap::Parser;
use std::path::PathBuf;

/// Drive an in-memory wallet ledger
#[derive(Parser, Debug)]
#[command(name = "wallet-ledger")]
#[command(about = "Register an account, move money, and save the ledger to disk", long_about = None)]
pub struct CliArgs {
    /// Phone number of the account to register
    #[arg(long = "phone", value_name = "PHONE", default_value = "+992000000000")]
    pub phone: String,

    /// Amount to deposit into the account
    #[arg(long = "deposit", value_name = "AMOUNT", default_value_t = 10)]
    pub deposit: Money,

    /// Amount to pay from the account after the deposit
    #[arg(long = "pay", value_name = "AMOUNT")]
    pub pay: Option<Money>,

    /// Category of the payment made with --pay
    #[arg(long = "category", value_name = "CATEGORY", default_value = "auto")]
    pub category: String,

    /// Number of worker threads for payment aggregation
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Worker threads for payment aggregation (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Directory to import dump files from before anything else
    #[arg(long = "import-dir", value_name = "DIR")]
    pub import_dir: Option<PathBuf>,

    /// Directory to export dump files into at the end
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// File to export accounts into using the single-file format
    #[arg(long = "accounts-file", value_name = "FILE")]
    pub accounts_file: Option<PathBuf>,
}

impl CliArgs {
    /// Create an AggregateConfig from CLI arguments
    ///
    /// Falls back to the default worker count when `--workers` is absent or
    /// zero.
    pub fn to_aggregate_config(&self) -> AggregateConfig {
        match self.workers {
            Some(workers) => AggregateConfig::new(workers),
            None => AggregateConfig::default(),
        }
    }
}
