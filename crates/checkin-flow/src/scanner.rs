//! Camera + QR decode capability abstraction.
//!
//! This core never touches camera hardware or QR symbol decoding; a
//! scanner delivers the already-decoded text of one symbol. Real
//! platform adapters and test doubles satisfy the same contract.

use async_trait::async_trait;

use checkin_core::error::AppError;

/// Trait for QR scanning backends.
#[async_trait]
pub trait QrScanner: Send + Sync + std::fmt::Debug + 'static {
    /// Capture one QR symbol and return its decoded text.
    async fn capture(&self) -> Result<String, AppError>;
}

/// Scanner returning a fixed payload.
///
/// Stands in for a camera in tests and in the kiosk CLI's simulated
/// check-in.
#[derive(Debug, Clone)]
pub struct StaticScanner {
    /// The payload to deliver.
    payload: String,
}

impl StaticScanner {
    /// Creates a scanner that always delivers `payload`.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl QrScanner for StaticScanner {
    async fn capture(&self) -> Result<String, AppError> {
        Ok(self.payload.clone())
    }
}
