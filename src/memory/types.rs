/*!
 * Memory Types
 * Common types for memory management
 */

use super::block::Block;
use crate::core::limits::{PRESSURE_CRITICAL_RATIO, PRESSURE_HIGH_RATIO, PRESSURE_MEDIUM_RATIO};
use crate::core::types::{Address, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Result of handing a block back to its manager
pub type ReleaseResult = Result<(), ReleaseError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum MemoryError {
    #[error("Not enough space. Requested {requested} bytes but only {available} are available")]
    #[diagnostic(
        code(memory::out_of_memory),
        help("Release allocations before requesting more memory.")
    )]
    OutOfMemory { requested: Size, available: Size },

    #[error("Data is longer than the memory that is allocated: {requested} bytes into a {available} byte block")]
    #[diagnostic(
        code(memory::capacity_exceeded),
        help("Allocate a block at least as long as the payload.")
    )]
    CapacityExceeded { requested: Size, available: Size },

    #[error("Zero-sized allocations are not supported")]
    #[diagnostic(code(memory::zero_sized))]
    ZeroSizedAllocation,

    #[error("Invalid capacity: {capacity} bytes requested over a {buffer_len} byte buffer")]
    #[diagnostic(
        code(memory::invalid_capacity),
        help("The capacity must not exceed the length of the supplied buffer.")
    )]
    InvalidCapacity { capacity: Size, buffer_len: Size },

    #[error("Block [{start}, {end}) was not allocated by this memory manager")]
    #[diagnostic(
        code(memory::foreign_block),
        help("Blocks can only be used with the memory manager that allocated them.")
    )]
    ForeignBlock { start: Address, end: Address },
}

/// A rejected release
///
/// The block comes back with the error so it can still be returned to the
/// manager that allocated it.
#[derive(Error, Debug, Diagnostic)]
#[error("{error}")]
#[diagnostic(forward(error))]
pub struct ReleaseError {
    error: MemoryError,
    block: Block,
}

impl ReleaseError {
    pub(crate) fn new(error: MemoryError, block: Block) -> Self {
        Self { error, block }
    }

    pub fn error(&self) -> &MemoryError {
        &self.error
    }

    /// Recover the rejected block
    pub fn into_block(self) -> Block {
        self.block
    }

    pub fn into_parts(self) -> (MemoryError, Block) {
        (self.error, self.block)
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub capacity: Size,
    pub used_bytes: Size,
    pub free_bytes: Size,
    pub free_blocks: usize,
    pub largest_free_block: Size,
    pub usage_percentage: f64,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.usage_percentage / 100.0)
    }

    /// True when free space exists but no single free block can hold it all
    pub fn is_fragmented(&self) -> bool {
        self.free_bytes > self.largest_free_block
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= PRESSURE_CRITICAL_RATIO {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH_RATIO {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM_RATIO {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
