//! # checkin-token
//!
//! Attendance token codec. Encodes a shift identifier, issuance
//! timestamp, and collision-avoidance nonce into the JSON payload
//! carried inside shift QR codes, and validates scanned payloads
//! (structural shape + freshness window).
//!
//! The token is a convenience correlation id, **not** an authorization
//! credential. A payload that decodes cleanly says nothing about
//! whether the scanning employee may check in; that decision belongs to
//! the attendance API and the caller's session credential.

pub mod codec;
pub mod error;
pub mod payload;

pub use codec::TokenCodec;
pub use error::TokenDecodeError;
pub use payload::AttendanceToken;
