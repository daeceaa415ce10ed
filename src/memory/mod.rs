/*!
 * Memory Module
 * Fixed-buffer allocation with fragmented block chains
 */

pub mod block;
pub mod config;
pub mod diagnostics;
pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use block::{Block, Segments};
pub use config::{AllocatorConfig, ShortWritePolicy};
pub use diagnostics::{BufferReport, ChainReport, FreeListReport};
pub use manager::{AllocationCounters, MemoryManager};
pub use traits::*;
pub use types::*;
