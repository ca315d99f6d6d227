//! Ledger operations
//!
//! This module provides the `Ledger`, the public face of the wallet. It owns
//! an [`EntityStore`] and implements every mutation and lookup on top of it.
//!
//! The ledger enforces these rules:
//! - Phones are unique at registration time
//! - Deposits and payments move strictly positive amounts
//! - A payment never drives a balance below zero
//! - Rejecting a payment refunds it exactly once
//!
//! # Concurrency
//!
//! Mutations take `&mut self` and the parallel aggregation methods take
//! `&self`, so nothing can modify the ledger while an aggregation is scanning
//! it. The ledger has no internal locking; share it across threads behind
//! your own lock.

use crate::core::store::EntityStore;
use crate::io::{dump, single_file, ImportSummary};
use crate::types::payment::new_id;
use crate::types::{
    Account, AccountId, Favorite, LedgerError, Money, Payment, PaymentCategory, PaymentStatus,
    Phone, Result,
};
use log::{debug, warn};
use std::path::Path;

/// In-memory wallet ledger
#[derive(Default)]
pub struct Ledger {
    pub(crate) store: EntityStore,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Ledger {
            store: EntityStore::new(),
        }
    }

    /// Register a new account with a zero balance
    ///
    /// # Errors
    ///
    /// Returns `PhoneAlreadyRegistered` if any account already uses `phone`.
    pub fn register_account(&mut self, phone: impl Into<Phone>) -> Result<&Account> {
        let phone = phone.into();
        if self.store.phone_owner(&phone).is_some() {
            return Err(LedgerError::phone_already_registered(&phone));
        }

        let id = self.store.next_account_id();
        debug!("Registered account {} for phone {}", id, phone);
        Ok(&*self.store.accounts.push(Account::new(id, phone)))
    }

    /// Credit an account
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is not positive (checked before the account lookup)
    /// - The account does not exist
    /// - The new balance would overflow
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<()> {
        if amount <= 0 {
            return Err(LedgerError::amount_must_be_positive(amount));
        }

        let account = self.find_account_mut(account_id)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", account_id))?;

        debug!("Deposited {} to account {}", amount, account_id);
        Ok(())
    }

    /// Debit an account and record a new in-progress payment
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is not positive
    /// - The account does not exist
    /// - The balance is lower than `amount`
    pub fn pay(
        &mut self,
        account_id: AccountId,
        amount: Money,
        category: impl Into<PaymentCategory>,
    ) -> Result<&Payment> {
        if amount <= 0 {
            return Err(LedgerError::amount_must_be_positive(amount));
        }

        let account = self.find_account_mut(account_id)?;
        if account.balance < amount {
            return Err(LedgerError::not_enough_balance(
                account_id,
                account.balance,
                amount,
            ));
        }
        account.balance -= amount;

        let payment = Payment {
            id: new_id(),
            account_id,
            amount,
            category: category.into(),
            status: PaymentStatus::InProgress,
        };
        debug!(
            "Payment {} of {} from account {}",
            payment.id, amount, account_id
        );

        Ok(&*self.store.payments.push(payment))
    }

    pub fn find_account_by_id(&self, account_id: AccountId) -> Result<&Account> {
        self.store
            .accounts
            .get(&account_id)
            .ok_or_else(|| LedgerError::account_not_found(account_id))
    }

    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<&Payment> {
        self.store
            .payments
            .get(payment_id)
            .ok_or_else(|| LedgerError::payment_not_found(payment_id))
    }

    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<&Favorite> {
        self.store
            .favorites
            .get(favorite_id)
            .ok_or_else(|| LedgerError::favorite_not_found(favorite_id))
    }

    fn find_account_mut(&mut self, account_id: AccountId) -> Result<&mut Account> {
        self.store
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| LedgerError::account_not_found(account_id))
    }

    /// Resolve a payment together with its owning account
    fn find_payment_and_account(&self, payment_id: &str) -> Result<(&Payment, &Account)> {
        let payment = self.find_payment_by_id(payment_id)?;
        let account = self.find_account_by_id(payment.account_id)?;
        Ok((payment, account))
    }

    /// Mark a payment as failed and refund its amount
    ///
    /// Rejecting a payment that is already `Fail` does nothing, so the
    /// amount is never refunded twice.
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` or `AccountNotFound` if either side is
    /// missing, or `ArithmeticOverflow` if the refund would overflow.
    pub fn reject(&mut self, payment_id: &str) -> Result<()> {
        let (status, account_id, amount) = {
            let (payment, account) = self.find_payment_and_account(payment_id)?;
            (payment.status, account.id, payment.amount)
        };

        if status == PaymentStatus::Fail {
            warn!("Payment {} is already rejected, ignoring", payment_id);
            return Ok(());
        }

        let account = self.find_account_mut(account_id)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("reject", account_id))?;

        if let Some(payment) = self.store.payments.get_mut(payment_id) {
            payment.status = PaymentStatus::Fail;
        }

        debug!(
            "Rejected payment {}, refunded {} to account {}",
            payment_id, amount, account_id
        );
        Ok(())
    }

    /// Pay again with the same account, amount, and category
    ///
    /// The new payment is independent of the original.
    pub fn repeat(&mut self, payment_id: &str) -> Result<&Payment> {
        let (account_id, amount, category) = {
            let (payment, account) = self.find_payment_and_account(payment_id)?;
            (account.id, payment.amount, payment.category.clone())
        };

        self.pay(account_id, amount, category)
    }

    /// Save a payment as a named favorite
    ///
    /// Amount and category are copied; later changes to the payment do not
    /// affect the favorite.
    pub fn favorite_payment(
        &mut self,
        payment_id: &str,
        name: impl Into<String>,
    ) -> Result<&Favorite> {
        let favorite = {
            let (payment, account) = self.find_payment_and_account(payment_id)?;
            Favorite {
                id: new_id(),
                account_id: account.id,
                name: name.into(),
                amount: payment.amount,
                category: payment.category.clone(),
            }
        };

        debug!("Saved favorite {} from payment {}", favorite.id, payment_id);
        Ok(&*self.store.favorites.push(favorite))
    }

    /// Make a payment from a saved favorite
    pub fn pay_from_favorite(&mut self, favorite_id: &str) -> Result<&Payment> {
        let (account_id, amount, category) = {
            let favorite = self.find_favorite_by_id(favorite_id)?;
            (favorite.account_id, favorite.amount, favorite.category.clone())
        };

        self.pay(account_id, amount, category)
    }

    /// Copies of every payment made from `account_id`, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown account and `NoPayments` if
    /// the account has no payments.
    pub fn export_account_history(&self, account_id: AccountId) -> Result<Vec<Payment>> {
        self.find_account_by_id(account_id)?;

        let payments: Vec<Payment> = self
            .store
            .payments
            .iter()
            .filter(|payment| payment.account_id == account_id)
            .cloned()
            .collect();

        if payments.is_empty() {
            warn!("Account {} has no payments", account_id);
            return Err(LedgerError::NoPayments { account_id });
        }

        Ok(payments)
    }

    /// All accounts in insertion order
    pub fn accounts(&self) -> &[Account] {
        self.store.accounts.as_slice()
    }

    /// All payments in insertion order
    pub fn payments(&self) -> &[Payment] {
        self.store.payments.as_slice()
    }

    /// All favorites in insertion order
    pub fn favorites(&self) -> &[Favorite] {
        self.store.favorites.as_slice()
    }

    /// Write all accounts to a single `|`-terminated file
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        single_file::export_to_file(&self.store, path.as_ref())
    }

    /// Append the accounts of a single-file export, returning how many were read
    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        single_file::import_from_file(&mut self.store, path.as_ref())
    }

    /// Write `accounts.dump`, `payments.dump`, and `favorites.dump` into `dir`
    pub fn export(&self, dir: impl AsRef<Path>) -> Result<()> {
        dump::export(&self.store, dir.as_ref())
    }

    /// Upsert the dump files found in `dir`
    pub fn import(&mut self, dir: impl AsRef<Path>) -> Result<ImportSummary> {
        dump::import(&mut self.store, dir.as_ref())
    }

    /// Write `payments` into `dir`, at most `records` per file
    pub fn history_to_files(
        &self,
        payments: &[Payment],
        dir: impl AsRef<Path>,
        records: usize,
    ) -> Result<()> {
        dump::history_to_files(payments, dir.as_ref(), records)
    }
}
