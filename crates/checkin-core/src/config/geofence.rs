//! Office geofence configuration.

use serde::{Deserialize, Serialize};

/// Registered office reference point and geofence radius.
///
/// Constant for the process lifetime; changing it requires redeploying
/// configuration. Defaults point at the Buea office (47WP+W6J).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeofenceConfig {
    /// Office latitude in degrees, range [-90, 90].
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Office longitude in degrees, range [-180, 180].
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Geofence radius in meters. A device exactly at the radius counts
    /// as inside.
    #[serde(default = "default_radius")]
    pub radius_meters: f64,
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            radius_meters: default_radius(),
        }
    }
}

fn default_latitude() -> f64 {
    4.1025
}

fn default_longitude() -> f64 {
    9.3908
}

fn default_radius() -> f64 {
    20.0
}
