//! I/O module
//!
//! Reads and writes ledger state as flat delimited text.
//!
//! # Components
//!
//! - `csv_format` - Shared record format (delimiters, positional serde, no quoting)
//! - `single_file` - Accounts-only file with `|`-terminated records
//! - `dump` - Three-file directory dump with upsert import, plus chunked history export

pub mod csv_format;
pub mod dump;
pub mod single_file;

pub use dump::{history_to_files, ImportSummary};
