//! Token decode failure taxonomy.

use thiserror::Error;

use checkin_core::error::{AppError, ErrorKind};

/// Why a scanned payload was rejected.
///
/// Both variants are recoverable by rescanning a fresh code; a rejected
/// payload is never coerced into a different shift.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenDecodeError {
    /// The payload could not be parsed into the expected structural
    /// shape (not JSON, missing fields, or wrong types).
    #[error("Invalid QR code format")]
    MalformedPayload {
        /// Parser-level detail, for logs rather than users.
        detail: String,
    },
    /// The payload parsed but its issuance timestamp is older than the
    /// validity window.
    #[error("QR code has expired")]
    Expired {
        /// How old the token was at decode time, in milliseconds.
        age_ms: i64,
    },
}

impl From<TokenDecodeError> for AppError {
    fn from(err: TokenDecodeError) -> Self {
        AppError::new(ErrorKind::Token, err.to_string())
    }
}
