//! Supporting modules: configuration, data directory, errors, clock,
//! logging, messages and typed preferences.

pub mod clock;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod logging;
pub mod messages;
pub mod preferences;
