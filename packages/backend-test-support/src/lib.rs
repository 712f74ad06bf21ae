//! Shared helpers for the tyre backend's integration tests: logging setup,
//! problem-details assertions and unique test values.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
