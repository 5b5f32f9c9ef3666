//! Geofence distance CLI command.

use clap::Args;

use checkin_core::config::AppConfig;
use checkin_core::error::AppError;
use checkin_geo::{GeoPoint, GeofenceEvaluator, format_distance};

/// Arguments for the distance command
#[derive(Debug, Args)]
pub struct DistanceArgs {
    /// Device latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    /// Device longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

/// Execute the distance command
pub fn execute(args: &DistanceArgs, config: &AppConfig) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&args.lat) {
        return Err(AppError::validation("Latitude must be within [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&args.lon) {
        return Err(AppError::validation("Longitude must be within [-180, 180]"));
    }

    let evaluator = GeofenceEvaluator::new(&config.office);
    let verdict = evaluator.evaluate(&GeoPoint::from_coordinates(args.lat, args.lon));

    println!(
        "Office:   {:.4}, {:.4} (radius {})",
        config.office.latitude,
        config.office.longitude,
        format_distance(verdict.max_allowed_meters)
    );
    println!("Distance: {}", format_distance(verdict.distance_meters));
    println!(
        "Verdict:  {}",
        if verdict.within_radius {
            "inside the geofence"
        } else {
            "outside the geofence"
        }
    );

    Ok(())
}
