//! Data models for the relay pipeline.

pub mod delivery;
pub mod message;

pub use delivery::*;
pub use message::*;
