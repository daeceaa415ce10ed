/*!
 * Memory Management
 *
 * First-fit allocator over a fixed-size byte buffer.
 *
 * ## Allocation
 *
 * The free list is an ordered sequence of simple blocks kept in the order they
 * became free. A request is served by, in turn:
 * - **Exact fit**: the first free block of exactly the requested size is handed out
 * - **Split**: the first free block that is larger is carved into an allocated
 *   prefix and a free remainder, which goes to the back of the list
 * - **Fragmentation**: when no single block is large enough, blocks are taken from
 *   the front of the list and chained until they cover the request, splitting the
 *   last one if it overshoots
 *
 * ## Features
 *
 * - **Exact accounting**: `free_bytes` always equals the sum of free block lengths
 * - **Scoped I/O**: reads and writes walk a chain as if it were contiguous
 * - **Ownership-checked release**: blocks are moved back on release and carry the
 *   id of the manager that created them
 *
 * Adjacent free blocks are never merged, so alloc/release churn only ever
 * increases fragmentation.
 */

mod allocator;
mod free_list;
mod storage;
mod tracking;

pub use tracking::AllocationCounters;

use super::block::Block;
use super::config::AllocatorConfig;
use super::types::{MemoryError, MemoryResult, MemoryStats};
use crate::core::types::{ManagerId, Size};
use free_list::FreeList;
use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(1);

/// Memory manager
pub struct MemoryManager {
    id: ManagerId,
    buffer: Vec<u8>,
    capacity: Size,
    free_bytes: Size,
    free_list: FreeList,
    config: AllocatorConfig,
    counters: AllocationCounters,
}

impl MemoryManager {
    /// Manage the first `capacity` bytes of `buffer`
    pub fn new(buffer: Vec<u8>, capacity: Size) -> MemoryResult<Self> {
        Self::with_config(buffer, capacity, AllocatorConfig::default())
    }

    /// Create memory manager over a zeroed buffer (useful for testing)
    pub fn with_capacity(capacity: Size) -> Self {
        let mut manager = Self::empty(vec![0u8; capacity], AllocatorConfig::default());
        manager.seed(capacity);
        manager
    }

    pub fn with_config(
        buffer: Vec<u8>,
        capacity: Size,
        config: AllocatorConfig,
    ) -> MemoryResult<Self> {
        if capacity > buffer.len() {
            return Err(MemoryError::InvalidCapacity {
                capacity,
                buffer_len: buffer.len(),
            });
        }

        let mut manager = Self::empty(buffer, config);
        manager.seed(capacity);
        Ok(manager)
    }

    fn empty(buffer: Vec<u8>, config: AllocatorConfig) -> Self {
        Self {
            id: NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed),
            buffer,
            capacity: 0,
            free_bytes: 0,
            free_list: FreeList::new(),
            config,
            counters: AllocationCounters::default(),
        }
    }

    fn seed(&mut self, capacity: Size) {
        self.capacity = capacity;
        self.free_bytes = capacity;
        if capacity > 0 {
            self.free_list.push(Block::new(self.id, 0, capacity));
        }
        info!(
            "Memory manager {} initialized with {} bytes (first-fit, no coalescing, {:?})",
            self.id, capacity, self.config
        );
    }

    #[inline]
    pub fn free_bytes(&self) -> Size {
        self.free_bytes
    }

    #[inline]
    pub fn capacity(&self) -> Size {
        self.capacity
    }

    #[inline]
    pub fn used_bytes(&self) -> Size {
        self.capacity - self.free_bytes
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    pub fn counters(&self) -> &AllocationCounters {
        &self.counters
    }

    /// Free blocks in list order
    pub fn free_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.free_list.iter()
    }

    /// The managed region of the buffer
    pub fn buffer(&self) -> &[u8] {
        &self.buffer[..self.capacity]
    }

    /// Give the underlying buffer back, discarding all bookkeeping
    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    pub fn stats(&self) -> MemoryStats {
        let usage_percentage = if self.capacity == 0 {
            0.0
        } else {
            (self.used_bytes() as f64 / self.capacity as f64) * 100.0
        };

        MemoryStats {
            capacity: self.capacity,
            used_bytes: self.used_bytes(),
            free_bytes: self.free_bytes,
            free_blocks: self.free_list.len(),
            largest_free_block: self.free_list.largest(),
            usage_percentage,
        }
    }

    /// Reject blocks that were handed out by another manager
    pub(super) fn check_owner(&self, block: &Block) -> MemoryResult<()> {
        if block.owner() == self.id {
            Ok(())
        } else {
            log::warn!(
                "Manager {} rejected block [{}, {}) owned by manager {}",
                self.id,
                block.start(),
                block.end(),
                block.owner()
            );
            Err(MemoryError::ForeignBlock {
                start: block.start(),
                end: block.end(),
            })
        }
    }
}

impl std::fmt::Debug for MemoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryManager")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("free_bytes", &self.free_bytes)
            .field("free_blocks", &self.free_list.len())
            .field("config", &self.config)
            .finish()
    }
}
