//! crates/moodmorph_core/src/ports.rs
//!
//! Defines the service contracts (traits) at the boundary of the core.
//! Concrete storage and analysis backends live in the service crate.

use async_trait::async_trait;

use crate::domain::{InsightResponse, JournalEntry, Locale};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A string key-value store holding serialized application state.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing was saved yet.
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> PortResult<()>;
}

#[async_trait]
pub trait InsightService: Send + Sync {
    /// Produces a summary of recent entries in the given locale.
    async fn analyze(&self, entries: &[JournalEntry], locale: Locale) -> PortResult<InsightResponse>;
}
