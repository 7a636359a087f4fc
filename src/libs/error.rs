//! Error type returned at the store's operation boundary.
//!
//! Callers get an explicit [`Result`] so that "no rows" and "the operation
//! failed" stay distinguishable. The [`Degrade`] extension restores the
//! never-crash behavior for UI code that prefers an empty value over an error.
//! Faults are already logged where the store operation failed, so degrading
//! only leaves a debug trace.

use crate::libs::messages::Message;
use crate::msg_debug;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Schema creation failed when the store was opened.
    #[error("store unavailable: schema initialization failed")]
    Unavailable,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable)
    }
}

/// Turns a failed store result into an empty value, logging the fault.
pub trait Degrade<T> {
    /// Returns `T::default()` on failure: an empty list, `None`, `0` or `false`.
    fn or_empty(self) -> T
    where
        T: Default;

    /// Returns `fallback` on failure.
    fn or_value(self, fallback: T) -> T;
}

impl<T> Degrade<T> for Result<T> {
    fn or_empty(self) -> T
    where
        T: Default,
    {
        self.or_value(T::default())
    }

    fn or_value(self, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                msg_debug!(Message::Degraded(e.to_string()));
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_empty_keeps_successful_values() {
        let ok: Result<Vec<i64>> = Ok(vec![1, 2]);
        assert_eq!(ok.or_empty(), vec![1, 2]);
    }

    #[test]
    fn or_empty_replaces_failures_with_default() {
        let failed: Result<Vec<i64>> = Err(StoreError::Unavailable);
        assert!(failed.or_empty().is_empty());

        let failed: Result<i64> = Err(StoreError::InvalidInput("bad".to_string()));
        assert_eq!(failed.or_empty(), 0);
    }

    #[test]
    fn or_value_uses_fallback() {
        let failed: Result<bool> = Err(StoreError::NotFound { entity: "child", id: 3 });
        assert!(failed.or_value(true));
    }
}
