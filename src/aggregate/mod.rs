//! Parallel aggregation over the payment collection
//!
//! This module provides sums and filters over every payment using a fixed
//! number of worker threads per call.
//!
//! # Architecture
//!
//! ```text
//! Ledger::sum_payments / filter_payments / filter_payments_by_fn
//!     └── fan_out
//!         ├── partition_ranges  (one contiguous range per worker)
//!         ├── scoped workers    (private partial result, no lock while scanning)
//!         └── Mutex<accumulator> (locked only to merge a partial)
//! ```
//!
//! Workers are created and joined inside each call. All of them are spawned
//! before the caller waits on any.

pub mod parallel;
pub mod partition;

pub use partition::partition_ranges;

use log::warn;

/// Configuration for parallel aggregation
#[derive(Clone, Debug)]
pub struct AggregateConfig {
    /// Number of worker threads per aggregation call
    pub workers: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
        }
    }
}

impl AggregateConfig {
    /// Create a config, falling back to the default worker count for zero
    pub fn new(workers: usize) -> Self {
        let default = Self::default();

        let workers = if workers == 0 {
            warn!(
                "Invalid worker count ({}), using default ({})",
                workers, default.workers
            );
            default.workers
        } else {
            workers
        };

        Self { workers }
    }
}
