/*!
 * Memory Allocator Implementation
 * Allocation and release logic
 */

use super::super::block::Block;
use super::super::types::{
    MemoryError, MemoryPressure, MemoryResult, ReleaseError, ReleaseResult,
};
use super::MemoryManager;
use crate::core::types::Size;
use log::{debug, error, warn};

impl MemoryManager {
    /// Allocate `size` bytes, contiguously when possible and as a chain otherwise
    ///
    /// Fails without touching any state when `size` exceeds the free byte count.
    pub fn allocate(&mut self, size: Size) -> MemoryResult<Block> {
        if size == 0 {
            return Err(MemoryError::ZeroSizedAllocation);
        }

        if size > self.free_bytes {
            error!(
                "OOM: requested {} bytes, only {} bytes available ({} used / {} total)",
                size,
                self.free_bytes,
                self.used_bytes(),
                self.capacity
            );
            return Err(MemoryError::OutOfMemory {
                requested: size,
                available: self.free_bytes,
            });
        }

        if self.free_list.is_empty() {
            error!(
                "No free memory blocks, yet accounting reports {} bytes free",
                self.free_bytes
            );
            return Err(MemoryError::OutOfMemory {
                requested: size,
                available: 0,
            });
        }

        let block = match self.free_list.first_fit(size) {
            Some(idx) => self.take_contiguous(idx, size),
            None => self.take_fragmented(size)?,
        };

        self.free_bytes -= size;
        let used = self.used_bytes();
        self.counters.record_allocation(block.is_fragmented(), used);

        let level = MemoryPressure::from_ratio(used as f64 / self.capacity as f64);
        if matches!(level, MemoryPressure::High | MemoryPressure::Critical) {
            warn!(
                "Memory pressure {}: allocated {} bytes at {} ({} / {} used)",
                level,
                size,
                block.start(),
                used,
                self.capacity
            );
        } else {
            debug!(
                "Allocated {} bytes at {} in {} segment(s), {} bytes free",
                size,
                block.start(),
                block.segment_count(),
                self.free_bytes
            );
        }

        Ok(block)
    }

    /// Return a block (and every segment chained to it) to the free list
    ///
    /// Each segment becomes its own simple free block appended in chain order.
    /// Nothing is merged with neighbouring free ranges. A block owned by another
    /// manager is handed back untouched inside the error.
    ///
    /// Blocks are moved in, so releasing the same block twice does not compile:
    ///
    /// ```compile_fail
    /// use chain_alloc::MemoryManager;
    ///
    /// let mut manager = MemoryManager::with_capacity(4);
    /// let block = manager.allocate(2).unwrap();
    /// manager.release(block).unwrap();
    /// manager.release(block).unwrap();
    /// ```
    pub fn release(&mut self, block: Block) -> ReleaseResult {
        let owned = block
            .segments()
            .try_for_each(|segment| self.check_owner(segment));
        if let Err(error) = owned {
            return Err(ReleaseError::new(error, block));
        }

        let start = block.start();
        let mut segments = 0;
        let mut bytes = 0;
        let mut next = Some(block);

        while let Some(mut segment) = next {
            next = segment.take_next();

            if self.config.scrub_on_release {
                self.buffer[segment.start()..segment.end()].fill(0);
            }

            segments += 1;
            bytes += segment.length();
            self.free_bytes += segment.length();
            self.free_list.push(segment);
        }

        self.counters.record_release(segments);
        debug!(
            "Released {} bytes in {} segment(s) starting at {}, {} bytes free in {} blocks",
            bytes,
            segments,
            start,
            self.free_bytes,
            self.free_list.len()
        );

        Ok(())
    }

    /// Hand out the free block at `idx`, splitting off any excess
    fn take_contiguous(&mut self, idx: usize, size: Size) -> Block {
        let mut block = self.free_list.remove(idx);

        if block.length() > size {
            let remainder = block.split_off(size);
            debug!(
                "Split block: keeping {} bytes at {}, returning {} bytes at {} to free list",
                size,
                block.start(),
                remainder.length(),
                remainder.start()
            );
            self.free_list.push(remainder);
            self.counters.record_split();
        }

        block
    }

    /// Chain free blocks from the front of the list until they cover `size`
    fn take_fragmented(&mut self, size: Size) -> MemoryResult<Block> {
        // Plan before mutating so a short free list leaves everything untouched
        let Some(count) = self.free_list.prefix_covering(size) else {
            let available = self.free_list.total_bytes();
            error!(
                "Free list holds {} bytes but accounting reports {} free; cannot cover {} bytes",
                available, self.free_bytes, size
            );
            return Err(MemoryError::OutOfMemory {
                requested: size,
                available,
            });
        };

        let mut segments = self.free_list.take_front(count);
        let covered: Size = segments.iter().map(Block::length).sum();

        if covered > size {
            if let Some(last) = segments.last_mut() {
                let keep = last.length() - (covered - size);
                let remainder = last.split_off(keep);
                self.free_list.push(remainder);
                self.counters.record_split();
            }
        }

        debug!(
            "Fragmented allocation of {} bytes across {} free blocks",
            size,
            segments.len()
        );

        segments
            .into_iter()
            .rev()
            .fold(None, |next: Option<Block>, mut segment| {
                if let Some(next) = next {
                    segment.link(next);
                }
                Some(segment)
            })
            .ok_or(MemoryError::OutOfMemory {
                requested: size,
                available: self.free_bytes,
            })
    }
}
