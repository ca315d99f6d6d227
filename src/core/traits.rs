//! Core traits for ledger entities
//!
//! Accounts, payments, and favorites are all stored the same way: in
//! insertion order with an index keyed by their ID. The [`Entity`] trait is
//! the seam that lets one [`Collection`](super::store::Collection) type hold
//! any of them.

use crate::types::{Account, AccountId, Favorite, FavoriteId, Payment, PaymentId};
use std::hash::Hash;

/// An entity addressable by a unique key
pub trait Entity {
    /// Key type used to index the entity
    type Id: Eq + Hash + Clone;

    /// The entity's key
    fn id(&self) -> &Self::Id;
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &AccountId {
        &self.id
    }
}

impl Entity for Payment {
    type Id = PaymentId;

    fn id(&self) -> &PaymentId {
        &self.id
    }
}

impl Entity for Favorite {
    type Id = FavoriteId;

    fn id(&self) -> &FavoriteId {
        &self.id
    }
}
