/*!
 * Allocation Tracking
 * Lifetime counters for allocate/release activity
 */

use crate::core::types::Size;
use serde::{Deserialize, Serialize};

/// Lifetime allocation counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationCounters {
    pub allocations: usize,
    /// Allocations satisfied by chaining several free blocks
    pub fragmented_allocations: usize,
    pub splits: usize,
    pub releases: usize,
    pub released_segments: usize,
    pub peak_used_bytes: Size,
}

impl AllocationCounters {
    pub(super) fn record_allocation(&mut self, fragmented: bool, used_bytes: Size) {
        self.allocations += 1;
        if fragmented {
            self.fragmented_allocations += 1;
        }
        self.peak_used_bytes = self.peak_used_bytes.max(used_bytes);
    }

    pub(super) fn record_split(&mut self) {
        self.splits += 1;
    }

    pub(super) fn record_release(&mut self, segments: usize) {
        self.releases += 1;
        self.released_segments += segments;
    }
}
