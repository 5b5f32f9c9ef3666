//! Device location acquisition configuration.

use serde::{Deserialize, Serialize};

/// Settings for one-shot device location fixes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Request a best-effort GNSS fix (slower, more power, tighter
    /// accuracy) rather than a coarse network-based fix.
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
    /// Maximum time to wait for a fix before failing with a timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// A cached fix no older than this may be returned instead of
    /// forcing a fresh read. Zero forces a fresh read every time.
    #[serde(default = "default_max_cached_age_ms")]
    pub max_cached_age_ms: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: default_high_accuracy(),
            timeout_ms: default_timeout_ms(),
            max_cached_age_ms: default_max_cached_age_ms(),
        }
    }
}

fn default_high_accuracy() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_max_cached_age_ms() -> u64 {
    60_000
}
