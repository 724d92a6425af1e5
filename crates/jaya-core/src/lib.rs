//! Jaya Core Library
//!
//! Delivery verification, payload decoding and chat notification for the Jaya
//! webhook relay.

pub mod config;
pub mod crypto;
pub mod decoder;
pub mod error;
pub mod models;
pub mod notify;
pub mod webhook;

pub use error::{RelayError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
