/*!
 * Memory Storage Operations
 * Read/write operations through a (possibly fragmented) block
 */

use super::super::block::Block;
use super::super::config::ShortWritePolicy;
use super::super::types::{MemoryError, MemoryResult};
use super::MemoryManager;
use log::trace;

impl MemoryManager {
    /// Read the whole block, segment by segment, as one contiguous byte vector
    pub fn read(&self, block: &Block) -> MemoryResult<Vec<u8>> {
        self.check_owner(block)?;

        let mut data = Vec::with_capacity(block.total_length());
        for segment in block.segments() {
            data.extend_from_slice(&self.buffer[segment.start()..segment.end()]);
        }

        trace!(
            "Read {} bytes from block at {} ({} segment(s))",
            data.len(),
            block.start(),
            block.segment_count()
        );
        Ok(data)
    }

    /// Write `data` into the block as if its segments were contiguous
    ///
    /// A payload shorter than the block only overwrites a prefix; the tail is
    /// governed by [`ShortWritePolicy`]. A payload longer than the block is
    /// rejected before any byte changes.
    pub fn write(&mut self, block: &Block, data: &[u8]) -> MemoryResult<()> {
        self.check_owner(block)?;

        let available = block.total_length();
        if data.len() > available {
            return Err(MemoryError::CapacityExceeded {
                requested: data.len(),
                available,
            });
        }

        let zero_fill = self.config.short_write == ShortWritePolicy::ZeroFill;
        let mut remaining = data;

        for segment in block.segments() {
            if remaining.is_empty() && !zero_fill {
                break;
            }

            let region = &mut self.buffer[segment.start()..segment.end()];
            let n = remaining.len().min(region.len());
            let (head, tail) = remaining.split_at(n);

            region[..n].copy_from_slice(head);
            if zero_fill {
                region[n..].fill(0);
            }
            remaining = tail;
        }

        trace!(
            "Wrote {} of {} bytes to block at {}",
            data.len(),
            available,
            block.start()
        );
        Ok(())
    }
}
