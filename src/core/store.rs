//! Entity storage for the ledger
//!
//! This module provides the `EntityStore` that owns every account, payment,
//! and favorite, plus the account-ID sequence.
//!
//! # Layout
//!
//! Each entity kind lives in a [`Collection`]: a `Vec` keeping insertion
//! order (used for export and aggregation) and a `HashMap` from ID to
//! position for constant-time lookup.
//!
//! # Duplicate IDs
//!
//! The legacy single-file import appends records verbatim, so a collection
//! may hold two entities with the same ID. The index always points at the
//! first one inserted, which is what a front-to-back scan would find.

use crate::core::traits::Entity;
use crate::types::{Account, AccountId, Favorite, LedgerError, Payment, Result};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered, ID-indexed collection of entities
pub struct Collection<T: Entity> {
    items: Vec<T>,
    index: HashMap<T::Id, usize>,
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Collection {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append an entity, returning a mutable reference to the stored copy
    ///
    /// If the ID is already present the index keeps pointing at the earlier
    /// entity.
    pub fn push(&mut self, item: T) -> &mut T {
        let position = self.items.len();
        self.index.entry(item.id().clone()).or_insert(position);
        self.items.push(item);
        &mut self.items[position]
    }

    pub fn get<Q>(&self, id: &Q) -> Option<&T>
    where
        T::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = *self.index.get(id)?;
        Some(&self.items[position])
    }

    pub fn get_mut<Q>(&mut self, id: &Q) -> Option<&mut T>
    where
        T::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = *self.index.get(id)?;
        Some(&mut self.items[position])
    }

    /// All entities in insertion order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of an upsert, used for import bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// Owner of all ledger entities and the account-ID sequence
pub struct EntityStore {
    /// Last account ID handed out (or observed through import)
    last_account_id: AccountId,
    pub(crate) accounts: Collection<Account>,
    pub(crate) payments: Collection<Payment>,
    pub(crate) favorites: Collection<Favorite>,
}

impl EntityStore {
    pub fn new() -> Self {
        EntityStore {
            last_account_id: 0,
            accounts: Collection::new(),
            payments: Collection::new(),
            favorites: Collection::new(),
        }
    }

    /// Reserve the next sequential account ID
    pub fn next_account_id(&mut self) -> AccountId {
        self.last_account_id += 1;
        self.last_account_id
    }

    /// Keep the sequence ahead of IDs that arrive from outside
    fn observe_account_id(&mut self, id: AccountId) {
        if id > self.last_account_id {
            self.last_account_id = id;
        }
    }

    /// ID of the first account registered with `phone`, if any
    pub fn phone_owner(&self, phone: &str) -> Option<AccountId> {
        self.accounts
            .iter()
            .find(|account| account.phone == phone)
            .map(|account| account.id)
    }

    /// Append an account verbatim, without reconciling against existing ones
    pub fn append_account(&mut self, account: Account) {
        self.observe_account_id(account.id);
        self.accounts.push(account);
    }

    /// Insert or update an account by ID
    ///
    /// # Errors
    ///
    /// Returns `PhoneAlreadyRegistered` if the phone belongs to an account
    /// with a different ID. Nothing is modified in that case.
    pub fn upsert_account(&mut self, account: Account) -> Result<Upsert> {
        if let Some(owner) = self.phone_owner(&account.phone) {
            if owner != account.id {
                return Err(LedgerError::phone_already_registered(&account.phone));
            }
        }

        if let Some(existing) = self.accounts.get_mut(&account.id) {
            existing.phone = account.phone;
            existing.balance = account.balance;
            return Ok(Upsert::Updated);
        }

        self.append_account(account);
        Ok(Upsert::Inserted)
    }

    /// Insert or update a payment by ID
    pub fn upsert_payment(&mut self, payment: Payment) -> Upsert {
        match self.payments.get_mut(payment.id.as_str()) {
            Some(existing) => {
                existing.account_id = payment.account_id;
                existing.amount = payment.amount;
                existing.category = payment.category;
                existing.status = payment.status;
                Upsert::Updated
            }
            None => {
                self.payments.push(payment);
                Upsert::Inserted
            }
        }
    }

    /// Insert or update a favorite by ID
    pub fn upsert_favorite(&mut self, favorite: Favorite) -> Upsert {
        match self.favorites.get_mut(favorite.id.as_str()) {
            Some(existing) => {
                existing.account_id = favorite.account_id;
                existing.name = favorite.name;
                existing.amount = favorite.amount;
                existing.category = favorite.category;
                Upsert::Updated
            }
            None => {
                self.favorites.push(favorite);
                Upsert::Inserted
            }
        }
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
