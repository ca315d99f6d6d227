//! Fan-out/fan-in aggregation with scoped worker threads
//!
//! Each worker scans its own slice of the payment collection into a private
//! partial result, then takes the shared mutex just long enough to merge it.
//! The scan itself needs no lock: aggregation borrows the ledger immutably,
//! so the payment collection cannot change while workers are running.
//!
//! A call either completes with every partition merged or does not complete
//! at all: a panic in any worker is re-raised on the calling thread once all
//! workers have been joined.

use super::partition::partition_ranges;
use crate::core::Ledger;
use crate::types::{AccountId, LedgerError, Money, Payment, Result};
use log::{error, warn};
use std::collections::BTreeMap;
use std::panic;
use std::sync::{Mutex, PoisonError};
use std::thread;

/// Split `items` across `workers` threads and fold their partial results
///
/// `scan` turns one partition (and its starting index) into a partial result
/// outside the lock; `merge` folds a partial into the accumulator under the
/// lock. Every worker is spawned before any is joined.
///
/// # Panics
///
/// If any worker panics, the first panic is resumed on the calling thread
/// after every worker has finished.
pub(crate) fn fan_out<T, A, P, S, M>(items: &[T], workers: usize, init: A, scan: S, merge: M) -> A
where
    T: Sync,
    A: Send,
    P: Send,
    S: Fn(usize, &[T]) -> P + Sync,
    M: Fn(&mut A, P) + Sync,
{
    let workers = if workers == 0 {
        warn!("Aggregation requested with 0 workers, using 1");
        1
    } else {
        workers
    };

    let accumulator = Mutex::new(init);

    let first_panic = thread::scope(|scope| {
        let handles: Vec<_> = partition_ranges(items.len(), workers)
            .map(|range| {
                let (accumulator, scan, merge) = (&accumulator, &scan, &merge);
                let start = range.start;
                let partition = &items[range];

                scope.spawn(move || {
                    let partial = scan(start, partition);
                    let mut guard = accumulator.lock().unwrap_or_else(PoisonError::into_inner);
                    merge(&mut *guard, partial);
                })
            })
            .collect();

        let mut first_panic = None;
        for handle in handles {
            if let Err(payload) = handle.join() {
                error!("Aggregation worker panicked, abandoning the call");
                if first_panic.is_none() {
                    first_panic = Some(payload);
                }
            }
        }
        first_panic
    });

    if let Some(payload) = first_panic {
        panic::resume_unwind(payload);
    }

    accumulator
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Filter `payments` in parallel, returning matches in collection order
///
/// Partials are merged under the lock into a map keyed by partition start,
/// then flattened once all workers are done.
fn filter_parallel<F>(payments: &[Payment], workers: usize, predicate: F) -> Vec<Payment>
where
    F: Fn(&Payment) -> bool + Sync,
{
    let partials = fan_out(
        payments,
        workers,
        BTreeMap::new(),
        |start, partition| {
            let matches: Vec<Payment> = partition
                .iter()
                .filter(|&payment| predicate(payment))
                .cloned()
                .collect();
            (start, matches)
        },
        |partials: &mut BTreeMap<usize, Vec<Payment>>, (start, matches)| {
            partials.insert(start, matches);
        },
    );

    partials.into_values().flatten().collect()
}

impl Ledger {
    /// Total of all payment amounts, computed by `workers` threads
    ///
    /// Partial sums are widened to `i128`, so the result does not depend on
    /// how the payments are partitioned.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the total does not fit in `Money`.
    pub fn sum_payments(&self, workers: usize) -> Result<Money> {
        // A slice cannot hold enough payments to overflow i128.
        let total = fan_out(
            self.payments(),
            workers,
            0i128,
            |_, partition| {
                partition
                    .iter()
                    .map(|payment| i128::from(payment.amount))
                    .sum::<i128>()
            },
            |sum: &mut i128, partial| *sum += partial,
        );

        Money::try_from(total).map_err(|_| LedgerError::ArithmeticOverflow {
            operation: "sum_payments".to_string(),
            account_id: None,
        })
    }

    /// Every payment of `account_id`, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn filter_payments(&self, account_id: AccountId, workers: usize) -> Result<Vec<Payment>> {
        let account_id = self.find_account_by_id(account_id)?.id;
        Ok(filter_parallel(self.payments(), workers, |payment| {
            payment.account_id == account_id
        }))
    }

    /// Every payment for which `predicate` returns true, in insertion order
    ///
    /// # Panics
    ///
    /// A panic inside `predicate` is propagated to the caller; no partial
    /// result is returned.
    pub fn filter_payments_by_fn<F>(&self, predicate: F, workers: usize) -> Vec<Payment>
    where
        F: Fn(&Payment) -> bool + Sync,
    {
        filter_parallel(self.payments(), workers, predicate)
    }
}
