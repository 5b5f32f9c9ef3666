//! Cross-crate contract tests: configuration defaults and wire shapes
//! shared with the QR generator and the attendance API.

use checkin_core::config::AppConfig;
use checkin_core::types::{EmployeeId, ShiftId};
use checkin_flow::CheckInRequest;
use checkin_geo::{GeoPoint, GeofenceEvaluator};
use checkin_token::{AttendanceToken, TokenCodec};

#[test]
fn test_default_config_points_at_the_registered_office() {
    let config = AppConfig::default();
    assert_eq!(config.office.latitude, 4.1025);
    assert_eq!(config.office.longitude, 9.3908);
    assert_eq!(config.office.radius_meters, 20.0);
    assert_eq!(config.token.validity_window_ms, 300_000);
    assert_eq!(config.location.timeout_ms, 15_000);
    assert!(config.location.high_accuracy);
}

#[test]
fn test_evaluator_from_default_config_admits_the_office_itself() {
    let config = AppConfig::default();
    let evaluator = GeofenceEvaluator::new(&config.office);
    let verdict = evaluator.evaluate(&GeoPoint::from_coordinates(
        config.office.latitude,
        config.office.longitude,
    ));
    assert!(verdict.within_radius);
    assert_eq!(verdict.distance_meters, 0.0);
}

#[test]
fn test_token_payload_matches_generator_wire_shape() {
    let codec = TokenCodec::new(&AppConfig::default().token);
    let payload = codec
        .encode_at(&ShiftId::new("shift-7"), 1_700_000_000_000)
        .expect("encode");

    let value: serde_json::Value = serde_json::from_str(&payload).expect("json");
    assert_eq!(value["shiftId"], "shift-7");
    assert_eq!(value["issuedAtEpochMs"], 1_700_000_000_000_i64);
    assert_eq!(value["locationTag"], "Buea-Office");
    assert!(value["nonce"].is_string());
}

#[test]
fn test_generator_payload_without_location_tag_still_decodes() {
    // Older generators omit the tag; it is not part of the gate.
    let codec = TokenCodec::new(&AppConfig::default().token);
    let payload = r#"{"shiftId":"shift-7","issuedAtEpochMs":1700000000000,"nonce":"abc123"}"#;
    let token: AttendanceToken = codec.decode_at(payload, 1_700_000_000_000).expect("decode");
    assert_eq!(token.location_tag, "");
}

#[test]
fn test_check_in_request_wire_shape() {
    let request = CheckInRequest {
        employee_id: EmployeeId::new(),
        scanned_payload: "{}".to_string(),
        location: GeoPoint::new(4.1025, 9.3908, 12.5),
    };

    let value = serde_json::to_value(&request).expect("serialize");
    assert!(value["employeeId"].is_string());
    assert_eq!(value["scannedPayload"], "{}");
    assert_eq!(value["location"]["latitude"], 4.1025);
    assert_eq!(value["location"]["longitude"], 9.3908);
    assert_eq!(value["location"]["accuracyMeters"], 12.5);
}
