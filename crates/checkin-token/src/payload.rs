//! Attendance token wire payload.

use serde::{Deserialize, Serialize};

use checkin_core::types::ShiftId;

/// The structured content of a shift QR code.
///
/// Serialized as camelCase JSON; this shape is shared with whichever
/// party generates the QR image (admin dashboard or backend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceToken {
    /// The shift this token was generated for.
    #[serde(rename = "shiftId")]
    pub shift_id: ShiftId,
    /// Issuance timestamp in epoch milliseconds.
    #[serde(rename = "issuedAtEpochMs")]
    pub issued_at_ms: i64,
    /// Random value distinguishing codes generated in the same
    /// millisecond. Not a secret.
    pub nonce: String,
    /// Constant tag naming the office the code was generated for.
    #[serde(rename = "locationTag", default)]
    pub location_tag: String,
}

impl AttendanceToken {
    /// Age of the token relative to `now_ms`, in milliseconds.
    ///
    /// Negative when the token claims issuance in the future.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.issued_at_ms
    }
}
