//! Centralized message texts and the logging macros that emit them.
//!
//! Every log line produced by the store goes through a [`Message`] variant so
//! that the wording lives in one place (`display.rs`).

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
