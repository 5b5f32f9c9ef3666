//! Check-in attempt domain events.
//!
//! The orchestrator broadcasts these to its host over a typed channel;
//! hosts render whatever UI they like.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ShiftId;

/// Events emitted over the lifetime of a check-in attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CheckInEvent {
    /// A new attempt started and location acquisition began.
    AttemptStarted {
        /// The attempt ID.
        attempt_id: Uuid,
    },
    /// The device fix landed inside the office geofence.
    LocationVerified {
        /// The attempt ID.
        attempt_id: Uuid,
        /// Computed distance to the office in meters.
        distance_meters: f64,
    },
    /// Location acquisition failed or the fix landed outside the geofence.
    LocationRejected {
        /// The attempt ID.
        attempt_id: Uuid,
        /// Human-readable rejection reason.
        reason: String,
        /// Computed distance in meters, when a fix was obtained.
        distance_meters: Option<f64>,
        /// Geofence radius in meters.
        max_allowed_meters: f64,
    },
    /// A scanned token decoded successfully and is unexpired.
    TokenAccepted {
        /// The attempt ID.
        attempt_id: Uuid,
        /// The shift the token belongs to.
        shift_id: ShiftId,
    },
    /// A scanned token was malformed or expired.
    TokenRejected {
        /// The attempt ID.
        attempt_id: Uuid,
        /// Human-readable rejection reason.
        reason: String,
    },
    /// The attendance API acknowledged the check-in.
    Submitted {
        /// The attempt ID.
        attempt_id: Uuid,
        /// The shift that was checked into.
        shift_id: ShiftId,
    },
    /// Submission failed (network error or server rejection).
    SubmitFailed {
        /// The attempt ID.
        attempt_id: Uuid,
        /// The server-provided or transport-level failure message.
        reason: String,
    },
    /// The user cancelled the attempt before it reached a terminal state.
    Cancelled {
        /// The attempt ID.
        attempt_id: Uuid,
    },
}
