//! Attendance API client configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external attendance API the orchestrator submits
/// check-in records to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the attendance API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the check-in submission endpoint, joined to `base_url`.
    #[serde(default = "default_checkin_path")]
    pub checkin_path: String,
    /// Deadline for a single submission request, in milliseconds.
    #[serde(default = "default_submit_timeout_ms")]
    pub submit_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            checkin_path: default_checkin_path(),
            submit_timeout_ms: default_submit_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_checkin_path() -> String {
    "/api/attendance/check-in".to_string()
}

fn default_submit_timeout_ms() -> u64 {
    10_000
}
