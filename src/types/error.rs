//! Error types for the wallet ledger
//!
//! Every ledger and codec operation reports failure through [`LedgerError`].
//! Callers are expected to match on the variant rather than on the message.
//!
//! # Error Categories
//!
//! - **Domain Errors**: phone taken, non-positive amount, unknown entity, insufficient balance, empty history
//! - **File Errors**: missing file, I/O failure, malformed record
//! - **Arithmetic Errors**: balance or payment-total overflow

use super::account::{AccountId, Money};
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Main error type for the wallet ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Another account already uses this phone number
    #[error("Phone {phone} is already registered")]
    PhoneAlreadyRegistered {
        /// The conflicting phone number
        phone: String,
    },

    /// Deposits and payments must move a strictly positive amount
    #[error("Amount must be greater than zero, got {amount}")]
    AmountMustBePositive {
        /// The rejected amount
        amount: Money,
    },

    /// No account with the given ID
    #[error("Account {account_id} not found")]
    AccountNotFound {
        /// The ID that was looked up
        account_id: AccountId,
    },

    /// The account balance does not cover the requested payment
    #[error("Not enough balance on account {account_id}: balance {balance}, requested {requested}")]
    NotEnoughBalance {
        /// Account being debited
        account_id: AccountId,
        /// Balance at the time of the request
        balance: Money,
        /// Requested payment amount
        requested: Money,
    },

    /// No payment with the given ID
    #[error("Payment {payment_id} not found")]
    PaymentNotFound {
        /// The ID that was looked up
        payment_id: String,
    },

    /// No favorite with the given ID
    #[error("Favorite {favorite_id} not found")]
    FavoriteNotFound {
        /// The ID that was looked up
        favorite_id: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A record in a ledger file could not be parsed
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line (or record) number where the error occurred, if known
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The account exists but has never made a payment
    #[error("Account {account_id} has no payments")]
    NoPayments {
        /// Account whose history was requested
        account_id: AccountId,
    },

    /// Money arithmetic would overflow
    #[error("Arithmetic overflow in {operation}{}", account_id.map(|id| format!(" for account {}", id)).unwrap_or_default())]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account being updated, if the operation concerns one account
        account_id: Option<AccountId>,
    },

    /// History export was asked to split into chunks of zero records
    #[error("Record limit per history file must be greater than zero")]
    InvalidRecordLimit,
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    pub fn phone_already_registered(phone: &str) -> Self {
        LedgerError::PhoneAlreadyRegistered {
            phone: phone.to_string(),
        }
    }

    pub fn amount_must_be_positive(amount: Money) -> Self {
        LedgerError::AmountMustBePositive { amount }
    }

    pub fn account_not_found(account_id: AccountId) -> Self {
        LedgerError::AccountNotFound { account_id }
    }

    pub fn not_enough_balance(account_id: AccountId, balance: Money, requested: Money) -> Self {
        LedgerError::NotEnoughBalance {
            account_id,
            balance,
            requested,
        }
    }

    pub fn payment_not_found(payment_id: &str) -> Self {
        LedgerError::PaymentNotFound {
            payment_id: payment_id.to_string(),
        }
    }

    pub fn favorite_not_found(favorite_id: &str) -> Self {
        LedgerError::FavoriteNotFound {
            favorite_id: favorite_id.to_string(),
        }
    }

    pub fn arithmetic_overflow(operation: &str, account_id: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account_id: Some(account_id),
        }
    }

    /// Map an I/O error on `path` to `FileNotFound` when the file is missing
    pub fn from_io_at(error: std::io::Error, path: &std::path::Path) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            LedgerError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            error.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::phone_taken(
        LedgerError::PhoneAlreadyRegistered { phone: "+992000000000".to_string() },
        "Phone +992000000000 is already registered"
    )]
    #[case::non_positive(
        LedgerError::AmountMustBePositive { amount: -5 },
        "Amount must be greater than zero, got -5"
    )]
    #[case::account_not_found(
        LedgerError::AccountNotFound { account_id: 7 },
        "Account 7 not found"
    )]
    #[case::not_enough_balance(
        LedgerError::NotEnoughBalance { account_id: 1, balance: 3, requested: 10 },
        "Not enough balance on account 1: balance 3, requested 10"
    )]
    #[case::file_not_found(
        LedgerError::FileNotFound { path: "accounts.dump".to_string() },
        "File not found: accounts.dump"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(3), message: "invalid digit".to_string() },
        "Parse error at line 3: invalid digit"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "invalid digit".to_string() },
        "Parse error: invalid digit"
    )]
    #[case::overflow(
        LedgerError::ArithmeticOverflow { operation: "deposit".to_string(), account_id: Some(2) },
        "Arithmetic overflow in deposit for account 2"
    )]
    #[case::overflow_without_account(
        LedgerError::ArithmeticOverflow { operation: "sum_payments".to_string(), account_id: None },
        "Arithmetic overflow in sum_payments"
    )]
    #[case::no_payments(
        LedgerError::NoPayments { account_id: 4 },
        "Account 4 has no payments"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::payment(
        LedgerError::payment_not_found("abc"),
        LedgerError::PaymentNotFound { payment_id: "abc".to_string() }
    )]
    #[case::favorite(
        LedgerError::favorite_not_found("fav"),
        LedgerError::FavoriteNotFound { favorite_id: "fav".to_string() }
    )]
    #[case::balance(
        LedgerError::not_enough_balance(1, 0, 1),
        LedgerError::NotEnoughBalance { account_id: 1, balance: 0, requested: 1 }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_missing_file_maps_to_file_not_found() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = LedgerError::from_io_at(io_error, Path::new("data/accounts.txt"));
        assert_eq!(
            error,
            LedgerError::FileNotFound {
                path: "data/accounts.txt".to_string()
            }
        );
    }
}
