//! Core ledger module
//!
//! This module contains the ledger's state and business rules:
//! - `traits` - The `Entity` abstraction shared by stored types
//! - `store` - ID-indexed, insertion-ordered entity storage
//! - `ledger` - Registration, deposits, payments, rejects, repeats, and favorites

pub mod ledger;
pub mod store;
pub mod traits;

pub use ledger::Ledger;
pub use store::{Collection, EntityStore, Upsert};
pub use traits::Entity;
