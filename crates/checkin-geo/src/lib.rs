//! # checkin-geo
//!
//! Great-circle distance evaluation against the office geofence.
//! Pure and deterministic; safe to call from any number of concurrent
//! attempts.

pub mod distance;
pub mod evaluator;
pub mod point;

pub use distance::{format_distance, haversine_distance_meters};
pub use evaluator::{DistanceVerdict, GeofenceEvaluator};
pub use point::GeoPoint;
