/*!
 * Allocator Configuration
 * Policies for stale data handling, loadable from the environment or JSON
 */

use crate::core::limits::{ENV_SCRUB, ENV_ZERO_FILL};
use serde::{Deserialize, Serialize};

/// What happens to the tail of a block when fewer bytes than its length are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortWritePolicy {
    /// Leave whatever the buffer previously held
    #[default]
    Preserve,
    /// Clear the unwritten tail to zero
    ZeroFill,
}

/// Memory manager configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    pub short_write: ShortWritePolicy,
    /// Zero every released range before it rejoins the free list
    pub scrub_on_release: bool,
}

impl AllocatorConfig {
    pub fn with_short_write(mut self, policy: ShortWritePolicy) -> Self {
        self.short_write = policy;
        self
    }

    pub fn with_scrub_on_release(mut self, scrub: bool) -> Self {
        self.scrub_on_release = scrub;
        self
    }

    /// Build a configuration from `CHAIN_ALLOC_ZERO_FILL` and `CHAIN_ALLOC_SCRUB`
    ///
    /// Unset or unrecognized values fall back to the defaults.
    pub fn from_env() -> Self {
        let short_write = if env_flag(ENV_ZERO_FILL) {
            ShortWritePolicy::ZeroFill
        } else {
            ShortWritePolicy::Preserve
        };

        Self {
            short_write,
            scrub_on_release: env_flag(ENV_SCRUB),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
