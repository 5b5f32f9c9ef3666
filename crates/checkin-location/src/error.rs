//! Location failure taxonomy.

use thiserror::Error;

use checkin_core::error::{AppError, ErrorKind};

/// Why a location fix could not be obtained.
///
/// Each variant maps to a distinct user-facing message and a "try
/// again" affordance in the host UI; none are fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user denied the platform permission prompt.
    #[error("Location access denied. Please enable location services.")]
    PermissionDenied,
    /// The platform could not determine a position.
    #[error("Location information is unavailable.")]
    PositionUnavailable,
    /// No fix arrived within the configured deadline.
    #[error("Location request timed out.")]
    Timeout,
    /// The platform has no location capability at all.
    #[error("Geolocation is not supported on this device.")]
    Unsupported,
    /// Anything the platform reported that fits none of the above.
    #[error("An unknown error occurred while retrieving location.")]
    Unknown {
        /// Platform-level detail, for logs rather than users.
        detail: String,
    },
}

impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        AppError::new(ErrorKind::Location, err.to_string())
    }
}
