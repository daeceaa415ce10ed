/*!
 * Allocator Limits and Constants
 *
 * Centralized location for defaults and thresholds used by the memory manager.
 */

// =============================================================================
// MEMORY LIMITS
// =============================================================================

/// Default simulated buffer size (10 bytes)
/// Small enough that free-list and buffer dumps stay readable in the demo binary
pub const DEFAULT_CAPACITY: usize = 10;

// =============================================================================
// MEMORY PRESSURE THRESHOLDS
// =============================================================================

/// Usage ratio at which pressure is reported as MEDIUM
pub const PRESSURE_MEDIUM_RATIO: f64 = 0.60;

/// Usage ratio at which pressure is reported as HIGH
pub const PRESSURE_HIGH_RATIO: f64 = 0.80;

/// Usage ratio at which pressure is reported as CRITICAL
pub const PRESSURE_CRITICAL_RATIO: f64 = 0.95;

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Buffer size used by the demo binary
pub const ENV_CAPACITY: &str = "CHAIN_ALLOC_CAPACITY";

/// Zero the unwritten tail of a block on short writes
pub const ENV_ZERO_FILL: &str = "CHAIN_ALLOC_ZERO_FILL";

/// Zero released ranges before they rejoin the free list
pub const ENV_SCRUB: &str = "CHAIN_ALLOC_SCRUB";

/// Emit JSON trace output instead of the compact format
pub const ENV_TRACE_JSON: &str = "CHAIN_ALLOC_TRACE_JSON";
