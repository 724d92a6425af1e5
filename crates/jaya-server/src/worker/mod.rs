//! Background workers for outbound notifications.

pub mod notify_processor;

pub use notify_processor::*;
