//! Attendance token encoding and validation.

use chrono::Utc;
use rand::distr::{Alphanumeric, SampleString};

use checkin_core::config::TokenConfig;
use checkin_core::error::AppError;
use checkin_core::types::ShiftId;

use crate::error::TokenDecodeError;
use crate::payload::AttendanceToken;

/// Nonce length in characters.
const NONCE_LEN: usize = 16;

/// Allowed forward clock skew between generator and scanner, in
/// milliseconds. Tokens claiming issuance further in the future than
/// this are rejected as malformed.
const CLOCK_SKEW_MS: i64 = 5_000;

/// Encodes and validates attendance tokens.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    /// Freshness window in milliseconds.
    validity_window_ms: i64,
    /// Tag embedded in generated tokens.
    location_tag: String,
}

impl TokenCodec {
    /// Creates a codec from token configuration.
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            validity_window_ms: config.validity_window_ms,
            location_tag: config.location_tag.clone(),
        }
    }

    /// Returns the configured validity window in milliseconds.
    pub fn validity_window_ms(&self) -> i64 {
        self.validity_window_ms
    }

    /// Encodes a token for `shift_id` issued now.
    pub fn encode(&self, shift_id: &ShiftId) -> Result<String, AppError> {
        self.encode_at(shift_id, Utc::now().timestamp_millis())
    }

    /// Encodes a token for `shift_id` with an explicit issuance time.
    pub fn encode_at(&self, shift_id: &ShiftId, now_ms: i64) -> Result<String, AppError> {
        let token = AttendanceToken {
            shift_id: shift_id.clone(),
            issued_at_ms: now_ms,
            nonce: Alphanumeric.sample_string(&mut rand::rng(), NONCE_LEN),
            location_tag: self.location_tag.clone(),
        };
        Ok(serde_json::to_string(&token)?)
    }

    /// Decodes a scanned payload against the wall clock.
    pub fn decode(&self, payload: &str) -> Result<AttendanceToken, TokenDecodeError> {
        self.decode_at(payload, Utc::now().timestamp_millis())
    }

    /// Decodes a scanned payload against an explicit clock reading.
    ///
    /// Structural failures (not JSON, missing `shiftId`, missing
    /// `issuedAtEpochMs`, wrong types) map to
    /// [`TokenDecodeError::MalformedPayload`]. A payload older than the
    /// validity window maps to [`TokenDecodeError::Expired`]; a payload
    /// exactly at the window boundary is still valid.
    pub fn decode_at(
        &self,
        payload: &str,
        now_ms: i64,
    ) -> Result<AttendanceToken, TokenDecodeError> {
        let token: AttendanceToken =
            serde_json::from_str(payload).map_err(|e| TokenDecodeError::MalformedPayload {
                detail: e.to_string(),
            })?;

        if token.shift_id.as_str().is_empty() {
            return Err(TokenDecodeError::MalformedPayload {
                detail: "empty shiftId".to_string(),
            });
        }

        let age_ms = token.age_ms(now_ms);
        if age_ms < -CLOCK_SKEW_MS {
            return Err(TokenDecodeError::MalformedPayload {
                detail: format!("issuedAtEpochMs is {} ms in the future", -age_ms),
            });
        }
        if age_ms > self.validity_window_ms {
            return Err(TokenDecodeError::Expired { age_ms });
        }

        Ok(token)
    }
}
