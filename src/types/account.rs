//! Account-related types for the wallet ledger
//!
//! This module defines the Account structure along with the identifier
//! and money aliases shared by every other entity.

use serde::{Deserialize, Serialize};

/// Account identifier, assigned sequentially starting at 1
pub type AccountId = i64;

/// Opaque integer currency units
pub type Money = i64;

/// Phone number used as the account's external handle
pub type Phone = String;

/// A wallet account
///
/// The ID is immutable once assigned. The phone is only rewritten by dump
/// import, and the balance never goes negative through a ledger operation.
///
/// Field order is the on-disk order: `ID;Phone;Balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Sequential account identifier
    pub id: AccountId,

    /// Phone number, unique across registered accounts
    pub phone: Phone,

    /// Current balance
    pub balance: Money,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(id: AccountId, phone: impl Into<Phone>) -> Self {
        Account {
            id,
            phone: phone.into(),
            balance: 0,
        }
    }
}
