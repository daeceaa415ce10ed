/*!
 * Core Types
 * Common types used across the allocator
 */

/// Offset of a byte inside the managed buffer
pub type Address = usize;

/// Byte count for memory operations
pub type Size = usize;

/// Identity of the manager that handed out a block
pub type ManagerId = u64;
