//! Webhook verification and delivery parsing.

pub mod parser;
pub mod verifier;

pub use parser::*;
pub use verifier::*;
