//! Attempt phase snapshots.

use serde::Serialize;

use checkin_geo::DistanceVerdict;
use checkin_token::AttendanceToken;

use crate::submit::CheckInReceipt;

/// Observable phase of a check-in attempt.
///
/// Location verification success advances straight to
/// [`Phase::AwaitingScan`]; the momentary verified state is reported to
/// subscribers as a `LocationVerified` event rather than a resting
/// phase, since scanning becomes active immediately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// No attempt in progress; no location or token held.
    Idle,
    /// Waiting for the platform to deliver a position fix.
    LocationPending,
    /// Acquisition failed, or the fix landed outside the geofence.
    LocationRejected {
        /// Human-readable rejection reason.
        reason: String,
        /// The verdict, when a fix was obtained and distance computed.
        verdict: Option<DistanceVerdict>,
    },
    /// Location verified; scanning is active.
    AwaitingScan {
        /// The verdict that admitted this attempt.
        verdict: DistanceVerdict,
    },
    /// A scanned token decoded cleanly and is unexpired.
    TokenAccepted {
        /// The decoded token.
        token: AttendanceToken,
    },
    /// The last scan was malformed or expired; rescanning is allowed.
    TokenRejected {
        /// Human-readable rejection reason.
        reason: String,
    },
    /// Submission to the attendance API is in flight.
    Submitting,
    /// The attendance API acknowledged the check-in. Terminal until an
    /// explicit reset.
    Success {
        /// The acknowledgement returned by the API.
        receipt: CheckInReceipt,
    },
    /// Submission failed. Terminal for this attempt; a fresh attempt
    /// must restart from location verification since the fix may now be
    /// stale.
    SubmitFailed {
        /// The server-provided or transport-level failure message.
        reason: String,
    },
}

impl Phase {
    /// Whether this phase ends the attempt (only an explicit reset
    /// leaves it).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Success { .. } | Phase::SubmitFailed { .. })
    }

    /// Whether a scanned payload would be honored right now.
    pub fn accepts_scan(&self) -> bool {
        matches!(
            self,
            Phase::AwaitingScan { .. } | Phase::TokenRejected { .. }
        )
    }

    /// Short lowercase name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::LocationPending => "location_pending",
            Phase::LocationRejected { .. } => "location_rejected",
            Phase::AwaitingScan { .. } => "awaiting_scan",
            Phase::TokenAccepted { .. } => "token_accepted",
            Phase::TokenRejected { .. } => "token_rejected",
            Phase::Submitting => "submitting",
            Phase::Success { .. } => "success",
            Phase::SubmitFailed { .. } => "submit_failed",
        }
    }
}
