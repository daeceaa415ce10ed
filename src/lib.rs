/*!
 * chain-alloc
 * First-fit allocator over a fixed byte buffer with fragmented allocations
 */

pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use memory::{
    AllocatorConfig, Block, MemoryError, MemoryManager, MemoryResult, MemoryStats,
    ReleaseError, ReleaseResult, ShortWritePolicy,
};
pub use monitoring::init_tracing;
