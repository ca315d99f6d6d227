//! Single-file account format
//!
//! Accounts only, one line, every record terminated by `|`:
//!
//! ```text
//! 1;+992000000000;10|2;+992000000001;0|
//! ```
//!
//! Import appends accounts exactly as read. It does not reconcile with
//! accounts already in the store, so duplicate IDs or phones are possible.

use crate::core::store::EntityStore;
use crate::io::csv_format::{read_records_from_path, write_records_to_path, SINGLE_FILE_TERMINATOR};
use crate::types::{Account, Result};
use log::debug;
use std::path::Path;

/// Write every account to `path`
///
/// The file is created empty when there are no accounts.
pub fn export_to_file(store: &EntityStore, path: &Path) -> Result<()> {
    write_records_to_path(path, store.accounts.iter(), SINGLE_FILE_TERMINATOR)?;
    debug!(
        "Exported {} accounts to {}",
        store.accounts.len(),
        path.display()
    );
    Ok(())
}

/// Append every account found in `path`, returning how many were read
///
/// # Errors
///
/// Returns `FileNotFound` if `path` does not exist and `ParseError` if any
/// record is malformed. On error nothing is appended.
pub fn import_from_file(store: &mut EntityStore, path: &Path) -> Result<usize> {
    let accounts: Vec<Account> = read_records_from_path(path, SINGLE_FILE_TERMINATOR)?;
    let count = accounts.len();

    for account in accounts {
        store.append_account(account);
    }

    debug!("Imported {} accounts from {}", count, path.display());
    Ok(count)
}
