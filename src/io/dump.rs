//! Directory dump format
//!
//! Three newline-terminated files inside one directory:
//!
//! ```text
//! accounts.dump   ID;Phone;Balance
//! payments.dump   ID;AccountID;Amount;Category;Status
//! favorites.dump  ID;AccountID;Name;Amount;Category
//! ```
//!
//! # Import Semantics
//!
//! Import is an upsert keyed by ID, applied to accounts, then payments, then
//! favorites. A missing file is logged and skipped. The first error stops the
//! import; entities upserted before it stay in place, so a failed import may
//! leave the ledger partially updated.
//!
//! # History Export
//!
//! [`history_to_files`] writes an arbitrary payment list in the payments
//! layout, split across `payments1.dump`, `payments2.dump`, … when it holds
//! more than the requested number of records.

use crate::core::store::{EntityStore, Upsert};
use crate::io::csv_format::{read_records_from_path, write_records_to_path, DUMP_TERMINATOR};
use crate::types::{Account, Favorite, LedgerError, Payment, Result};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::path::Path;

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

/// Counts of entities touched by a dump import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
}

impl ImportSummary {
    fn record(&mut self, outcome: Upsert) {
        match outcome {
            Upsert::Inserted => self.inserted += 1,
            Upsert::Updated => self.updated += 1,
        }
    }
}

/// Write the three dump files into `dir`
///
/// A file is written only when its collection is non-empty; an existing file
/// for an empty collection is left untouched.
pub fn export(store: &EntityStore, dir: &Path) -> Result<()> {
    if !store.accounts.is_empty() {
        write_records_to_path(&dir.join(ACCOUNTS_FILE), store.accounts.iter(), DUMP_TERMINATOR)?;
    }

    if !store.payments.is_empty() {
        write_records_to_path(&dir.join(PAYMENTS_FILE), store.payments.iter(), DUMP_TERMINATOR)?;
    }

    if !store.favorites.is_empty() {
        write_records_to_path(
            &dir.join(FAVORITES_FILE),
            store.favorites.iter(),
            DUMP_TERMINATOR,
        )?;
    }

    debug!(
        "Exported {} accounts, {} payments, {} favorites to {}",
        store.accounts.len(),
        store.payments.len(),
        store.favorites.len(),
        dir.display()
    );
    Ok(())
}

/// Upsert the contents of the three dump files found in `dir`
///
/// # Errors
///
/// Returns the first parse or I/O error, or `PhoneAlreadyRegistered` when an
/// account record reuses the phone of an account with another ID.
pub fn import(store: &mut EntityStore, dir: &Path) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    if let Some(accounts) = read_dump::<Account>(&dir.join(ACCOUNTS_FILE))? {
        for account in accounts {
            summary.record(store.upsert_account(account)?);
        }
    }

    if let Some(payments) = read_dump::<Payment>(&dir.join(PAYMENTS_FILE))? {
        for payment in payments {
            summary.record(store.upsert_payment(payment));
        }
    }

    if let Some(favorites) = read_dump::<Favorite>(&dir.join(FAVORITES_FILE))? {
        for favorite in favorites {
            summary.record(store.upsert_favorite(favorite));
        }
    }

    debug!(
        "Imported from {}: {} inserted, {} updated",
        dir.display(),
        summary.inserted,
        summary.updated
    );
    Ok(summary)
}

/// Read one dump file, treating a missing file as absent rather than an error
fn read_dump<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
    match read_records_from_path(path, DUMP_TERMINATOR) {
        Ok(records) => Ok(Some(records)),
        Err(LedgerError::FileNotFound { path }) => {
            warn!("Dump file not found, skipping: {}", path);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Write `payments` into `dir` in chunks of at most `records` lines
///
/// A list that fits in one chunk goes to `payments.dump`; a longer list is
/// split into `payments1.dump`, `payments2.dump`, and so on. An empty list
/// writes nothing.
///
/// # Errors
///
/// Returns `InvalidRecordLimit` if `records` is zero and the list is not
/// empty.
pub fn history_to_files(payments: &[Payment], dir: &Path, records: usize) -> Result<()> {
    if payments.is_empty() {
        warn!("No payments to export to {}", dir.display());
        return Ok(());
    }

    if records == 0 {
        return Err(LedgerError::InvalidRecordLimit);
    }

    if payments.len() <= records {
        write_records_to_path(&dir.join(PAYMENTS_FILE), payments, DUMP_TERMINATOR)?;
        debug!("Exported {} payments to {}", payments.len(), dir.display());
        return Ok(());
    }

    for (index, chunk) in payments.chunks(records).enumerate() {
        let path = dir.join(format!("payments{}.dump", index + 1));
        write_records_to_path(&path, chunk, DUMP_TERMINATOR)?;
        debug!("Exported {} payments to {}", chunk.len(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentStatus;
    use rstest::rstest;
    use std::fs;

    fn payment(id: &str, amount: i64) -> Payment {
        Payment {
            id: id.to_string(),
            account_id: 1,
            amount,
            category: "auto".to_string(),
            status: PaymentStatus::InProgress,
        }
    }

    fn seeded_store() -> EntityStore {
        let mut store = EntityStore::new();
        store.append_account(Account {
            id: 1,
            phone: "+992000000000".to_string(),
            balance: 10,
        });
        store.payments.push(payment("p-1", 4));
        store.favorites.push(Favorite {
            id: "f-1".to_string(),
            account_id: 1,
            name: "car".to_string(),
            amount: 4,
            category: "auto".to_string(),
        });
        store
    }

    #[test]
    fn test_export_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        export(&seeded_store(), dir.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(ACCOUNTS_FILE)).unwrap(),
            "1;+992000000000;10\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(PAYMENTS_FILE)).unwrap(),
            "p-1;1;4;auto;INPROGRESS\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(FAVORITES_FILE)).unwrap(),
            "f-1;1;car;4;auto\n"
        );
    }

    #[test]
    fn test_export_skips_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = EntityStore::new();
        store.append_account(Account {
            id: 1,
            phone: "+1".to_string(),
            balance: 0,
        });

        export(&store, dir.path()).unwrap();

        assert!(dir.path().join(ACCOUNTS_FILE).exists());
        assert!(!dir.path().join(PAYMENTS_FILE).exists());
        assert!(!dir.path().join(FAVORITES_FILE).exists());
    }

    #[test]
    fn test_import_into_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        export(&seeded_store(), dir.path()).unwrap();

        let mut store = EntityStore::new();
        let summary = import(&mut store, dir.path()).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                inserted: 3,
                updated: 0
            }
        );
        assert_eq!(store.accounts.get(&1).unwrap().balance, 10);
        assert_eq!(store.payments.get("p-1").unwrap().amount, 4);
        assert_eq!(store.favorites.get("f-1").unwrap().name, "car");
    }

    #[test]
    fn test_import_updates_existing_entities() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ACCOUNTS_FILE), "1;+992000000000;99\n").unwrap();
        fs::write(dir.path().join(PAYMENTS_FILE), "p-1;1;4;auto;FAIL\n").unwrap();

        let mut store = seeded_store();
        let summary = import(&mut store, dir.path()).unwrap();

        assert_eq!(summary.updated, 2);
        assert_eq!(store.accounts.len(), 1);
        assert_eq!(store.accounts.get(&1).unwrap().balance, 99);
        assert_eq!(
            store.payments.get("p-1").unwrap().status,
            PaymentStatus::Fail
        );
    }

    #[test]
    fn test_import_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = EntityStore::new();

        let summary = import(&mut store, dir.path()).unwrap();
        assert_eq!(summary, ImportSummary::default());
    }

    #[test]
    fn test_import_keeps_earlier_files_on_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ACCOUNTS_FILE), "1;+1;5\n").unwrap();
        fs::write(dir.path().join(PAYMENTS_FILE), "p-1;1;lots;auto;FAIL\n").unwrap();

        let mut store = EntityStore::new();
        let result = import(&mut store, dir.path());

        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
        assert_eq!(store.accounts.len(), 1);
        assert!(store.payments.is_empty());
    }

    #[test]
    fn test_import_rejects_duplicate_phone() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ACCOUNTS_FILE), "2;+992000000000;5\n").unwrap();

        let mut store = seeded_store();
        let result = import(&mut store, dir.path());

        assert!(matches!(
            result,
            Err(LedgerError::PhoneAlreadyRegistered { .. })
        ));
        assert_eq!(store.accounts.len(), 1);
    }

    #[test]
    fn test_history_fits_in_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let payments = vec![payment("a", 1), payment("b", 2)];

        history_to_files(&payments, dir.path(), 2).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(PAYMENTS_FILE)).unwrap(),
            "a;1;1;auto;INPROGRESS\nb;1;2;auto;INPROGRESS\n"
        );
        assert!(!dir.path().join("payments1.dump").exists());
    }

    #[rstest]
    #[case::uneven(5, 2, vec![2, 2, 1])]
    #[case::even(6, 3, vec![3, 3])]
    #[case::one_per_file(3, 1, vec![1, 1, 1])]
    fn test_history_split_into_chunks(
        #[case] total: usize,
        #[case] records: usize,
        #[case] expected_lines: Vec<usize>,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let payments: Vec<Payment> = (0..total)
            .map(|i| payment(&format!("p-{}", i), i as i64 + 1))
            .collect();

        history_to_files(&payments, dir.path(), records).unwrap();

        for (index, lines) in expected_lines.iter().enumerate() {
            let path = dir.path().join(format!("payments{}.dump", index + 1));
            let content = fs::read_to_string(&path).unwrap();
            assert_eq!(content.lines().count(), *lines, "{}", path.display());
        }
        let extra = dir
            .path()
            .join(format!("payments{}.dump", expected_lines.len() + 1));
        assert!(!extra.exists());
        assert!(!dir.path().join(PAYMENTS_FILE).exists());
    }

    #[test]
    fn test_history_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        history_to_files(&[], dir.path(), 0).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_history_zero_record_limit() {
        let dir = tempfile::tempdir().unwrap();
        let result = history_to_files(&[payment("a", 1)], dir.path(), 0);
        assert_eq!(result, Err(LedgerError::InvalidRecordLimit));
    }
}
