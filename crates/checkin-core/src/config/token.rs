//! Attendance token configuration.

use serde::{Deserialize, Serialize};

/// Attendance token freshness and tagging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// How long a generated token stays acceptable, in milliseconds.
    /// A token exactly at the window boundary is still valid.
    #[serde(default = "default_validity_window_ms")]
    pub validity_window_ms: i64,
    /// Constant location tag embedded in every generated token.
    #[serde(default = "default_location_tag")]
    pub location_tag: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            validity_window_ms: default_validity_window_ms(),
            location_tag: default_location_tag(),
        }
    }
}

fn default_validity_window_ms() -> i64 {
    300_000
}

fn default_location_tag() -> String {
    "Buea-Office".to_string()
}
