//! services/api/src/adapters/local_insight.rs
//!
//! Implements the `InsightService` port with the deterministic local
//! analysis from the core. No external model is called.

use async_trait::async_trait;
use moodmorph_core::domain::{InsightResponse, JournalEntry, Locale};
use moodmorph_core::insight::analyze;
use moodmorph_core::ports::{InsightService, PortResult};
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct LocalInsightAdapter;

impl LocalInsightAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InsightService for LocalInsightAdapter {
    async fn analyze(&self, entries: &[JournalEntry], locale: Locale) -> PortResult<InsightResponse> {
        debug!("Running local insight over {} entries", entries.len());
        Ok(analyze(entries, locale))
    }
}
