//! Delimited record format shared by every ledger file
//!
//! All ledger files are `;`-separated fields with a one-byte record
//! terminator (`\n` for dump files, `|` for the single-file format). There is
//! no header row and no quoting or escaping: a value containing `;`, the
//! record terminator, or a quote character is written verbatim. Such values
//! corrupt the file on the way back in; this is a known limitation of the
//! legacy format.
//!
//! Two more edges follow from the same rules. A `\r\n` line ending leaves
//! `\r` in the last field, so a record whose last field is numeric fails to
//! parse. A record with more fields than the entity has is accepted and the
//! trailing fields are ignored.
//!
//! Records are (de)serialized positionally with serde, so the field order of
//! the entity struct is the column order on disk.
//!
//! The reader/writer functions here are generic over `Read`/`Write` so the
//! format can be tested without touching the filesystem.

use crate::types::{LedgerError, Result};
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Separator between fields of one record
pub const FIELD_DELIMITER: u8 = b';';

/// Record terminator of the directory dump format
pub const DUMP_TERMINATOR: u8 = b'\n';

/// Record terminator of the single-file account format
pub const SINGLE_FILE_TERMINATOR: u8 = b'|';

fn writer_builder(terminator: u8) -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .has_headers(false)
        .delimiter(FIELD_DELIMITER)
        .terminator(Terminator::Any(terminator))
        .quote_style(QuoteStyle::Never);
    builder
}

fn reader_builder(terminator: u8) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(FIELD_DELIMITER)
        .terminator(Terminator::Any(terminator))
        .quoting(false);
    builder
}

/// Serialize records to `output`, each followed by `terminator`
///
/// Writing zero records produces zero bytes.
pub fn write_records<'a, T, I, W>(records: I, terminator: u8, output: W) -> Result<()>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
    W: Write,
{
    let mut writer = writer_builder(terminator).from_writer(output);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Deserialize every record from `input`
///
/// Empty records (two terminators in a row, or a trailing terminator) are
/// skipped. The first malformed record aborts the read; nothing is returned
/// for the records before it.
pub fn read_records<T, R>(terminator: u8, input: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = reader_builder(terminator).from_reader(input);

    reader
        .deserialize()
        .map(|record| record.map_err(LedgerError::from))
        .collect()
}

/// Create (or truncate) `path` and write records to it
///
/// A failure part-way leaves the partially written file behind.
pub fn write_records_to_path<'a, T, I>(path: &Path, records: I, terminator: u8) -> Result<()>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let file = File::create(path).map_err(|e| LedgerError::from_io_at(e, path))?;
    write_records(records, terminator, file)
}

/// Read every record from `path`
///
/// # Errors
///
/// Returns `FileNotFound` if `path` does not exist.
pub fn read_records_from_path<T>(path: &Path, terminator: u8) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let file = File::open(path).map_err(|e| LedgerError::from_io_at(e, path))?;
    read_records(terminator, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Account, Favorite, Payment, PaymentStatus};
    use rstest::rstest;

    fn account(id: i64, phone: &str, balance: i64) -> Account {
        Account {
            id,
            phone: phone.to_string(),
            balance,
        }
    }

    fn render<T: Serialize>(records: &[T], terminator: u8) -> String {
        let mut output = Vec::new();
        write_records(records, terminator, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    #[case::dump(DUMP_TERMINATOR, "1;+992000000000;10\n2;+992000000001;0\n")]
    #[case::single_file(SINGLE_FILE_TERMINATOR, "1;+992000000000;10|2;+992000000001;0|")]
    fn test_write_accounts(#[case] terminator: u8, #[case] expected: &str) {
        let accounts = vec![
            account(1, "+992000000000", 10),
            account(2, "+992000000001", 0),
        ];
        assert_eq!(render(&accounts, terminator), expected);
    }

    #[test]
    fn test_write_nothing_is_empty() {
        let accounts: Vec<Account> = Vec::new();
        assert_eq!(render(&accounts, SINGLE_FILE_TERMINATOR), "");
    }

    #[test]
    fn test_write_payment_and_favorite_field_order() {
        let payments = vec![Payment {
            id: "p-1".to_string(),
            account_id: 1,
            amount: 4,
            category: "auto".to_string(),
            status: PaymentStatus::InProgress,
        }];
        let favorites = vec![Favorite {
            id: "f-1".to_string(),
            account_id: 1,
            name: "car".to_string(),
            amount: 4,
            category: "auto".to_string(),
        }];

        assert_eq!(render(&payments, DUMP_TERMINATOR), "p-1;1;4;auto;INPROGRESS\n");
        assert_eq!(render(&favorites, DUMP_TERMINATOR), "f-1;1;car;4;auto\n");
    }

    #[test]
    fn test_quotes_are_not_escaped() {
        let accounts = vec![account(1, "\"quoted\"", 0)];
        assert_eq!(render(&accounts, DUMP_TERMINATOR), "1;\"quoted\";0\n");

        let parsed: Vec<Account> =
            read_records(DUMP_TERMINATOR, "1;\"quoted\";0\n".as_bytes()).unwrap();
        assert_eq!(parsed, accounts);
    }

    #[test]
    fn test_read_skips_empty_segments() {
        let parsed: Vec<Account> =
            read_records(SINGLE_FILE_TERMINATOR, "1;+1;5||2;+2;7|".as_bytes()).unwrap();
        assert_eq!(parsed, vec![account(1, "+1", 5), account(2, "+2", 7)]);
    }

    #[test]
    fn test_read_payment_status() {
        let parsed: Vec<Payment> =
            read_records(DUMP_TERMINATOR, "p-1;3;9;food;FAIL\n".as_bytes()).unwrap();
        assert_eq!(parsed[0].status, PaymentStatus::Fail);
        assert_eq!(parsed[0].account_id, 3);
        assert_eq!(parsed[0].amount, 9);
    }

    #[rstest]
    #[case::bad_id("x;+1;5\n")]
    #[case::bad_balance("1;+1;five\n")]
    #[case::missing_field("1;+1\n")]
    fn test_read_malformed_account(#[case] input: &str) {
        let result: Result<Vec<Account>> = read_records(DUMP_TERMINATOR, input.as_bytes());
        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }

    #[test]
    fn test_read_unknown_status() {
        let result: Result<Vec<Payment>> =
            read_records(DUMP_TERMINATOR, "p-1;3;9;food;DONE\n".as_bytes());
        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }

    #[test]
    fn test_read_crlf_line_ending_fails() {
        let result: Result<Vec<Account>> =
            read_records(DUMP_TERMINATOR, "1;+1;5\r\n".as_bytes());
        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }

    #[test]
    fn test_read_ignores_trailing_fields() {
        let parsed: Vec<Account> =
            read_records(DUMP_TERMINATOR, "1;+1;5;extra\n".as_bytes()).unwrap();
        assert_eq!(parsed, vec![account(1, "+1", 5)]);
    }

    #[test]
    fn test_read_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.dump");

        let result: Result<Vec<Account>> = read_records_from_path(&path, DUMP_TERMINATOR);
        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }
}
