//! Shared domain types.

pub mod id;

pub use id::{AttemptId, EmployeeId, ShiftId};
