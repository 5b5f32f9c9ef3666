//! Device position fix value type.

use serde::{Deserialize, Serialize};

/// A single device position fix.
///
/// Produced by the location acquirer, consumed immediately by one
/// check-in attempt, and never retained beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, range [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, range [-180, 180].
    pub longitude: f64,
    /// Reported fix accuracy in meters, >= 0.
    #[serde(rename = "accuracyMeters", default)]
    pub accuracy_meters: f64,
}

impl GeoPoint {
    /// Create a fix with an accuracy radius.
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters,
        }
    }

    /// Create a fix from bare coordinates (accuracy unknown, reported as 0).
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, 0.0)
    }
}
