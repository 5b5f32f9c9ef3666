//! Check-in submission to the attendance API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use checkin_core::config::ApiConfig;
use checkin_core::error::{AppError, ErrorKind};
use checkin_core::types::EmployeeId;
use checkin_geo::GeoPoint;

/// The record the orchestrator submits once all client-side gates have
/// passed. The API re-verifies independently; nothing here is trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRequest {
    /// The employee checking in (session identity, injected by the host).
    #[serde(rename = "employeeId")]
    pub employee_id: EmployeeId,
    /// The raw scanned QR payload, forwarded verbatim.
    #[serde(rename = "scannedPayload")]
    pub scanned_payload: String,
    /// The device fix the geofence verdict was computed from.
    pub location: GeoPoint,
}

/// Acknowledgement returned by the attendance API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInReceipt {
    /// Server-provided confirmation message.
    pub message: String,
    /// When the server recorded the check-in, epoch milliseconds.
    #[serde(rename = "checkedInAtEpochMs")]
    pub checked_in_at_ms: Option<i64>,
}

/// Why a submission failed.
///
/// Both failure classes are terminal for the current attempt and
/// recoverable by starting a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The request never produced a server verdict (DNS, connect,
    /// transport failure).
    #[error("Network error: {detail}")]
    Network {
        /// Transport-level detail.
        detail: String,
    },
    /// The server rejected the check-in ("outside shift window",
    /// "already checked in", "invalid token", ...).
    #[error("{message}")]
    Rejected {
        /// The server-provided message, surfaced to the user as is.
        message: String,
    },
    /// No server verdict arrived within the configured deadline.
    #[error("Check-in submission timed out.")]
    Timeout,
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        AppError::new(ErrorKind::Submission, err.to_string())
    }
}

/// Trait for the external attendance API boundary.
#[async_trait]
pub trait CheckInSubmitter: Send + Sync + std::fmt::Debug + 'static {
    /// Submit one check-in record.
    async fn submit(&self, request: &CheckInRequest) -> Result<CheckInReceipt, SubmitError>;
}

/// Wire shape of the attendance API's check-in response.
#[derive(Debug, Deserialize)]
struct ApiCheckInResponse {
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(rename = "checkedInAtEpochMs", default)]
    checked_in_at_ms: Option<i64>,
}

/// HTTP submitter for the attendance REST API.
#[derive(Debug, Clone)]
pub struct HttpCheckInSubmitter {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// Full check-in endpoint URL.
    url: String,
    /// Bearer session credential, injected at construction rather than
    /// read from ambient storage.
    session_token: String,
}

impl HttpCheckInSubmitter {
    /// Creates a submitter from API configuration and a session credential.
    pub fn new(config: &ApiConfig, session_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                config.checkin_path
            ),
            session_token: session_token.into(),
        }
    }
}

#[async_trait]
impl CheckInSubmitter for HttpCheckInSubmitter {
    async fn submit(&self, request: &CheckInRequest) -> Result<CheckInReceipt, SubmitError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.session_token)
            .json(request)
            .send()
            .await
            .map_err(|e| SubmitError::Network {
                detail: e.to_string(),
            })?;

        let status = response.status();
        let body: ApiCheckInResponse =
            response.json().await.map_err(|e| SubmitError::Network {
                detail: format!("Malformed API response: {e}"),
            })?;

        if !status.is_success() || !body.success {
            let message = if body.message.is_empty() {
                format!("Check-in rejected (HTTP {})", status.as_u16())
            } else {
                body.message
            };
            tracing::warn!(status = %status, %message, "check-in rejected by API");
            return Err(SubmitError::Rejected { message });
        }

        Ok(CheckInReceipt {
            message: body.message,
            checked_in_at_ms: body.checked_in_at_ms,
        })
    }
}
