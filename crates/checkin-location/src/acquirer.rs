//! Deadline and cache policy around a location provider.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use checkin_geo::GeoPoint;

use crate::error::LocationError;
use crate::provider::{LocationOptions, LocationProvider};

/// A previously obtained fix with its acquisition time.
#[derive(Debug, Clone, Copy)]
struct CachedFix {
    fix: GeoPoint,
    acquired_at: Instant,
}

/// Acquires one-shot location fixes with timeout and caching.
///
/// Enforces the configured deadline regardless of provider behavior and
/// serves a recent cached fix when the options permit it. One acquirer
/// is shared by all attempts of a session.
#[derive(Debug, Clone)]
pub struct LocationAcquirer {
    /// The platform backend.
    provider: Arc<dyn LocationProvider>,
    /// Fix request options.
    options: LocationOptions,
    /// Last successful fix. Lock is never held across an await.
    cached: Arc<Mutex<Option<CachedFix>>>,
}

impl LocationAcquirer {
    /// Creates an acquirer over a platform provider.
    pub fn new(provider: Arc<dyn LocationProvider>, options: LocationOptions) -> Self {
        Self {
            provider,
            options,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the options this acquirer was built with.
    pub fn options(&self) -> &LocationOptions {
        &self.options
    }

    /// Acquires a position fix.
    ///
    /// Returns a cached fix no older than `max_cached_age_ms` when one
    /// exists; otherwise requests a fresh fix from the provider, failing
    /// with [`LocationError::Timeout`] if nothing arrives within
    /// `timeout_ms`. Resolves exactly once.
    pub async fn acquire(&self) -> Result<GeoPoint, LocationError> {
        if let Some(fix) = self.cached_fix() {
            tracing::debug!(
                max_age_ms = self.options.max_cached_age_ms,
                "serving cached location fix"
            );
            return Ok(fix);
        }

        let deadline = Duration::from_millis(self.options.timeout_ms);
        let fix = match tokio::time::timeout(deadline, self.provider.acquire(&self.options)).await
        {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(timeout_ms = self.options.timeout_ms, "location fix timed out");
                return Err(LocationError::Timeout);
            }
        };

        tracing::debug!(
            latitude = fix.latitude,
            longitude = fix.longitude,
            accuracy_m = fix.accuracy_meters,
            "acquired location fix"
        );

        let mut cached = self.cached.lock().expect("cache lock poisoned");
        *cached = Some(CachedFix {
            fix,
            acquired_at: Instant::now(),
        });

        Ok(fix)
    }

    /// Drops any cached fix so the next acquisition is forced fresh.
    pub fn invalidate_cache(&self) {
        let mut cached = self.cached.lock().expect("cache lock poisoned");
        *cached = None;
    }

    fn cached_fix(&self) -> Option<GeoPoint> {
        if self.options.max_cached_age_ms == 0 {
            return None;
        }
        let max_age = Duration::from_millis(self.options.max_cached_age_ms);
        let cached = self.cached.lock().expect("cache lock poisoned");
        cached
            .as_ref()
            .filter(|c| c.acquired_at.elapsed() <= max_age)
            .map(|c| c.fix)
    }
}
