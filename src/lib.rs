//! Wallet Ledger Library
//! # Overview
//!
//! An in-memory wallet ledger that tracks accounts, payments, and favorite
//! payment templates, saves its state to flat text files, and aggregates
//! payments in parallel.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Payment, Favorite, errors)
//! - [`core`] - Business logic components:
//!   - [`core::store`] - ID-indexed entity storage
//!   - [`core::ledger`] - Ledger operations
//! - [`io`] - Single-file and directory dump formats
//! - [`aggregate`] - Parallel sums and filters over payments
//! - [`cli`] - CLI arguments parsing for the demo binary
//!
//! # Operations
//!
//! - **Register**: Open an account for a unique phone number
//! - **Deposit**: Credit an account
//! - **Pay**: Debit an account and record an in-progress payment
//! - **Reject**: Fail a payment and refund it
//! - **Repeat**: Pay again with the same account, amount, and category
//! - **Favorite**: Save a payment as a reusable template, then pay from it
//!
//! # Example
//!
//! ```
//! use wallet_ledger::Ledger;
//!
//! let mut ledger = Ledger::new();
//! let id = ledger.register_account("+992000000000").unwrap().id;
//! ledger.deposit(id, 10).unwrap();
//! let payment_id = ledger.pay(id, 4, "auto").unwrap().id.clone();
//! ledger.reject(&payment_id).unwrap();
//!
//! assert_eq!(ledger.find_account_by_id(id).unwrap().balance, 10);
//! assert_eq!(ledger.sum_payments(2).unwrap(), 4);
//! ```

// Module declarations
pub mod aggregate;
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use aggregate::AggregateConfig;
pub use core::Ledger;
pub use io::ImportSummary;
pub use types::{
    Account, AccountId, Favorite, LedgerError, Money, Payment, PaymentCategory, PaymentStatus,
    Phone, Result,
};
