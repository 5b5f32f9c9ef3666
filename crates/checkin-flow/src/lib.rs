//! # checkin-flow
//!
//! Check-in attempt orchestration. Sequences location acquisition,
//! geofence evaluation, token validation, and submission to the
//! attendance API as a strict state machine: a submission is only
//! reachable through an accepted token, which is only reachable through
//! a verified location.
//!
//! The state machine is a UX gate, not a security boundary; the
//! attendance API re-verifies every submission independently.

pub mod flow;
pub mod scanner;
pub mod state;
pub mod submit;

pub use flow::CheckInFlow;
pub use scanner::{QrScanner, StaticScanner};
pub use state::Phase;
pub use submit::{
    CheckInReceipt, CheckInRequest, CheckInSubmitter, HttpCheckInSubmitter, SubmitError,
};
