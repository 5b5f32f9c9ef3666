//! Shared test doubles for the check-in integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use checkin_core::config::AppConfig;
use checkin_flow::{CheckInReceipt, CheckInRequest, CheckInSubmitter, SubmitError};
use checkin_geo::GeoPoint;
use checkin_location::{LocationError, LocationOptions, LocationProvider};

/// The registered office fix from the default configuration.
pub fn office_fix() -> GeoPoint {
    GeoPoint::new(4.1025, 9.3908, 5.0)
}

/// Default configuration with location caching disabled so every
/// attempt sees a fresh fix.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.location.max_cached_age_ms = 0;
    config
}

/// Provider that serves fixes from a queue, repeating the last one when
/// the queue runs dry. Lets a test move the device between attempts.
#[derive(Debug)]
pub struct QueueProvider {
    fixes: Mutex<VecDeque<GeoPoint>>,
    fallback: GeoPoint,
}

impl QueueProvider {
    pub fn new(fixes: impl IntoIterator<Item = GeoPoint>, fallback: GeoPoint) -> Self {
        Self {
            fixes: Mutex::new(fixes.into_iter().collect()),
            fallback,
        }
    }
}

#[async_trait]
impl LocationProvider for QueueProvider {
    async fn acquire(&self, _options: &LocationOptions) -> Result<GeoPoint, LocationError> {
        let mut fixes = self.fixes.lock().expect("queue lock");
        Ok(fixes.pop_front().unwrap_or(self.fallback))
    }
}

/// Provider that blocks until the test releases it, so a cancellation
/// can land while acquisition is pending.
#[derive(Debug)]
pub struct GatedProvider {
    fix: GeoPoint,
    gate: Arc<Notify>,
}

impl GatedProvider {
    pub fn new(fix: GeoPoint) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Self {
                fix,
                gate: Arc::clone(&gate),
            },
            gate,
        )
    }
}

#[async_trait]
impl LocationProvider for GatedProvider {
    async fn acquire(&self, _options: &LocationOptions) -> Result<GeoPoint, LocationError> {
        self.gate.notified().await;
        Ok(self.fix)
    }
}

/// Submitter that records every request and answers with a canned result.
#[derive(Debug)]
pub struct RecordingSubmitter {
    requests: Mutex<Vec<CheckInRequest>>,
    response: Result<CheckInReceipt, SubmitError>,
    delay: Duration,
}

impl RecordingSubmitter {
    pub fn accepting() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: Ok(CheckInReceipt {
                message: "Checked in".to_string(),
                checked_in_at_ms: Some(1_700_000_000_000),
            }),
            delay: Duration::ZERO,
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response: Err(SubmitError::Rejected {
                message: message.to_string(),
            }),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<CheckInRequest> {
        self.requests.lock().expect("request lock").clone()
    }
}

#[async_trait]
impl CheckInSubmitter for RecordingSubmitter {
    async fn submit(&self, request: &CheckInRequest) -> Result<CheckInReceipt, SubmitError> {
        self.requests
            .lock()
            .expect("request lock")
            .push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.clone()
    }
}
