/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::block::Block;
use super::manager::MemoryManager;
use super::types::{MemoryResult, MemoryStats, ReleaseResult};
use crate::core::types::Size;

/// Memory allocator interface
pub trait Allocator {
    /// Allocate `size` bytes, possibly as a chain of disjoint ranges
    fn allocate(&mut self, size: Size) -> MemoryResult<Block>;

    /// Return a block and every segment chained to it
    fn release(&mut self, block: Block) -> ReleaseResult;
}

/// Scoped access to the bytes behind a block
pub trait BlockStorage {
    fn read(&self, block: &Block) -> MemoryResult<Vec<u8>>;

    fn write(&mut self, block: &Block, data: &[u8]) -> MemoryResult<()>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size) {
        let stats = self.stats();
        (stats.capacity, stats.used_bytes, stats.free_bytes)
    }
}

// Implement trait interfaces
impl Allocator for MemoryManager {
    fn allocate(&mut self, size: Size) -> MemoryResult<Block> {
        MemoryManager::allocate(self, size)
    }

    fn release(&mut self, block: Block) -> ReleaseResult {
        MemoryManager::release(self, block)
    }
}

impl BlockStorage for MemoryManager {
    fn read(&self, block: &Block) -> MemoryResult<Vec<u8>> {
        MemoryManager::read(self, block)
    }

    fn write(&mut self, block: &Block, data: &[u8]) -> MemoryResult<()> {
        MemoryManager::write(self, block, data)
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }
}
