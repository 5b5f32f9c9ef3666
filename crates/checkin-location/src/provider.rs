//! Platform location capability abstraction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use checkin_core::config::LocationConfig;
use checkin_geo::GeoPoint;

use crate::error::LocationError;

/// Options forwarded to the platform for a single fix request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOptions {
    /// Request a best-effort GNSS fix rather than a coarse network fix.
    pub high_accuracy: bool,
    /// Deadline enforced by the acquirer, in milliseconds. Forwarded as
    /// a hint; the acquirer cuts the request off regardless of whether
    /// the platform honors it.
    pub timeout_ms: u64,
    /// Maximum acceptable age of a cached fix, in milliseconds.
    pub max_cached_age_ms: u64,
}

impl From<&LocationConfig> for LocationOptions {
    fn from(config: &LocationConfig) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout_ms: config.timeout_ms,
            max_cached_age_ms: config.max_cached_age_ms,
        }
    }
}

/// Trait for platform location backends.
///
/// Implementations wrap whatever one-shot positioning capability the
/// target platform exposes. The first call per session may trigger a
/// user-facing permission prompt that takes arbitrarily long; the
/// acquirer bounds the wait, implementations do not need to.
#[async_trait]
pub trait LocationProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Request a single position fix.
    async fn acquire(&self, options: &LocationOptions) -> Result<GeoPoint, LocationError>;
}

/// Deterministic provider returning a fixed position.
///
/// Stands in for a real platform adapter in tests and in the kiosk
/// CLI's simulated check-in, satisfying the same contract.
#[derive(Debug)]
pub struct StaticProvider {
    /// The fix to return.
    fix: GeoPoint,
    /// Artificial delay before resolving.
    delay: Duration,
    /// Number of times `acquire` has been called.
    calls: AtomicU64,
}

impl StaticProvider {
    /// Creates a provider that resolves immediately with `fix`.
    pub fn new(fix: GeoPoint) -> Self {
        Self {
            fix,
            delay: Duration::ZERO,
            calls: AtomicU64::new(0),
        }
    }

    /// Adds an artificial delay before each fix resolves.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns how many times `acquire` has been called.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for StaticProvider {
    async fn acquire(&self, _options: &LocationOptions) -> Result<GeoPoint, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.fix)
    }
}
