//! Entity id allocation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Allocates opaque, lexicographically sortable id tokens.
///
/// Ids are a fixed-width decimal derived from epoch milliseconds, forced
/// strictly increasing by an atomic high-water mark (so two allocations in
/// the same millisecond never collide in-process), plus a short random hex
/// suffix hedging against allocations from other processes.
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Allocate the next id. Strictly greater than every id previously
    /// returned by this generator, in both numeric and string order.
    pub fn next_id(&self) -> String {
        // Three decimal digits of headroom per millisecond.
        let candidate = Utc::now().timestamp_millis() as u64 * 1000;
        let mut assigned = 0;
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                assigned = candidate.max(last + 1);
                Some(assigned)
            })
            .ok();
        format!("{assigned:017}{:04x}", rand::random::<u16>())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
