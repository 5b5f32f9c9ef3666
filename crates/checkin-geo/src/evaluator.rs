//! Geofence verdicts against the registered office.

use serde::{Deserialize, Serialize};

use checkin_core::config::GeofenceConfig;

use crate::distance::haversine_distance_meters;
use crate::point::GeoPoint;

/// Outcome of comparing a device fix against the office geofence.
///
/// Derived per attempt and never persisted. A fix outside the radius is
/// a normal outcome, not an error; the distance and threshold are kept
/// so the host can show the user the gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceVerdict {
    /// Computed distance to the office in meters.
    pub distance_meters: f64,
    /// Whether the fix is inside the geofence (non-strict boundary).
    pub within_radius: bool,
    /// The geofence radius the fix was compared against.
    pub max_allowed_meters: f64,
}

/// Evaluates device fixes against the registered office geofence.
#[derive(Debug, Clone)]
pub struct GeofenceEvaluator {
    /// Office reference point.
    office: GeoPoint,
    /// Geofence radius in meters.
    radius_meters: f64,
}

impl GeofenceEvaluator {
    /// Creates an evaluator from geofence configuration.
    pub fn new(config: &GeofenceConfig) -> Self {
        Self {
            office: GeoPoint::from_coordinates(config.latitude, config.longitude),
            radius_meters: config.radius_meters,
        }
    }

    /// Returns the office reference point.
    pub fn office(&self) -> GeoPoint {
        self.office
    }

    /// Returns the geofence radius in meters.
    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Compares a device fix against the geofence.
    ///
    /// A fix exactly at the radius counts as inside.
    pub fn evaluate(&self, fix: &GeoPoint) -> DistanceVerdict {
        let distance_meters = haversine_distance_meters(fix, &self.office);
        DistanceVerdict {
            distance_meters,
            within_radius: distance_meters <= self.radius_meters,
            max_allowed_meters: self.radius_meters,
        }
    }
}
