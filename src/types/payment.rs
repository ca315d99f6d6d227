//! Payment and favorite types for the wallet ledger
//!
//! Payments record a debit from an account. Favorites are reusable payment
//! templates copied from an existing payment.

use super::account::{AccountId, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Payment identifier (random UUID in string form)
pub type PaymentId = String;

/// Favorite identifier (random UUID in string form)
pub type FavoriteId = String;

/// Free-form payment category tag
pub type PaymentCategory = String;

/// Generate a fresh random identifier for a payment or favorite
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Payment status
///
/// There is no terminal success state: a payment that is never rejected
/// stays `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// Debited and not rejected
    InProgress,

    /// Rejected, amount refunded to the account
    Fail,
}

impl PaymentStatus {
    /// Text form used in dump files
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::InProgress => "INPROGRESS",
            PaymentStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment made from an account
///
/// Field order is the on-disk order: `ID;AccountID;Amount;Category;Status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Random unique identifier
    pub id: PaymentId,

    /// Owning account
    pub account_id: AccountId,

    /// Debited amount, always positive when created through the ledger
    pub amount: Money,

    /// Category tag
    pub category: PaymentCategory,

    /// Current status
    pub status: PaymentStatus,
}

/// A saved payment template
///
/// Amount and category are a snapshot of the source payment taken when the
/// favorite was created. Field order is the on-disk order:
/// `ID;AccountID;Name;Amount;Category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub account_id: AccountId,
    pub name: String,
    pub amount: Money,
    pub category: PaymentCategory,
}
