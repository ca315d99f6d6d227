//! Work partitioning for aggregation workers
//!
//! With `n` items and `g` workers every worker gets a chunk of
//! `n / g + 1` items. The extra item per chunk guarantees the chunks cover
//! any remainder, at the cost of trailing workers sometimes getting an empty
//! range.

use std::ops::Range;

/// Index range scanned by each of `workers` workers over `len` items
///
/// Worker `i` gets `[i * chunk, (i + 1) * chunk)` clipped to `len`. Exactly
/// `workers` ranges are produced; ranges past the end are empty.
///
/// `workers` must be at least 1.
pub fn partition_ranges(len: usize, workers: usize) -> impl Iterator<Item = Range<usize>> {
    let chunk = len / workers + 1;

    (0..workers).map(move |worker| {
        let start = (worker * chunk).min(len);
        let end = ((worker + 1) * chunk).min(len);
        start..end
    })
}
