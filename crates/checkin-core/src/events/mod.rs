//! Domain events emitted by the check-in core.

pub mod checkin;

pub use checkin::CheckInEvent;
