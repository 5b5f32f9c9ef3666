//! # checkin-location
//!
//! One-shot device location acquisition. Wraps a platform
//! [`LocationProvider`] with deadline enforcement and a cached-fix
//! policy, and normalizes platform failures into a typed taxonomy.
//!
//! A fix is a single reading, not a stream; there is no internal retry.
//! The orchestrator decides whether to offer the user another go.

pub mod acquirer;
pub mod error;
pub mod provider;

pub use acquirer::LocationAcquirer;
pub use error::LocationError;
pub use provider::{LocationOptions, LocationProvider, StaticProvider};
