//! Jaya server library.
//!
//! This library exposes the server components for use in integration tests.

pub mod cli;
pub mod routes;
pub mod state;
pub mod worker;

pub use state::AppState;
pub use worker::{NotifyJob, start_notify_processor};

// Re-export jaya_core for convenience
pub use jaya_core;

// Test utilities are available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
