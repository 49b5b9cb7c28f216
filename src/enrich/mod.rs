//! Metadata enrichment of scraped records.
//!
//! Each record gets exactly one metadata lookup keyed by its title. Lookups
//! run concurrently up to a fixed bound, each under its own deadline, and a
//! failed lookup only ever affects its own record.

mod types;


pub use types::{
    EnrichedRecord, FallbackReason, Figure, Lookup, MetadataResult, PLACEHOLDER_POSTER,
};

use crate::catalog::Record;
use crate::provider::MetadataLookup;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Enricher configuration
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Maximum lookups in flight for one batch
    pub concurrency: usize,
    /// Deadline for a single lookup
    pub timeout: Duration,
    /// Poster used by the fallback metadata
    pub placeholder_poster: String,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            timeout: Duration::from_secs(2),
            placeholder_poster: PLACEHOLDER_POSTER.to_string(),
        }
    }
}

/// Joins records with metadata from a lookup provider
#[derive(Clone)]
pub struct Enricher {
    lookup: Arc<dyn MetadataLookup>,
    config: EnrichConfig,
}

impl Enricher {
    pub fn with_config(lookup: Arc<dyn MetadataLookup>, mut config: EnrichConfig) -> Self {
        config.concurrency = config.concurrency.max(1);
        Self { lookup, config }
    }

    #[must_use]
    pub const fn config(&self) -> &EnrichConfig {
        &self.config
    }

    /// Enrich `records`, returning one entry per record in input order
    pub async fn enrich(&self, records: Vec<Record>) -> Vec<EnrichedRecord> {
        if records.is_empty() {
            return Vec::new();
        }

        let mut slots: Vec<Option<Lookup>> = vec![None; records.len()];
        {
            let tasks: Vec<_> = records
                .iter()
                .enumerate()
                .map(|(index, record)| {
                    let title = record.title.clone();
                    async move { (index, self.lookup_one(&title).await) }
                })
                .collect();
            let mut outcomes = stream::iter(tasks).buffer_unordered(self.config.concurrency);

            while let Some((index, outcome)) = outcomes.next().await {
                slots[index] = Some(outcome);
            }
        }

        let mut matched = 0usize;
        let enriched: Vec<EnrichedRecord> = records
            .into_iter()
            .zip(slots)
            .map(|(record, slot)| {
                let metadata = match slot {
                    Some(Lookup::Found(metadata)) => {
                        matched += 1;
                        metadata
                    }
                    Some(Lookup::Fallback(reason)) => {
                        log_fallback(&record.title, &reason);
                        self.fallback()
                    }
                    None => self.fallback(),
                };
                EnrichedRecord { record, metadata }
            })
            .collect();

        debug!(
            provider = self.lookup.id(),
            total = enriched.len(),
            matched,
            "Enriched batch"
        );

        enriched
    }

    /// Run one lookup under the per-item deadline
    pub async fn lookup_one(&self, title: &str) -> Lookup {
        match tokio::time::timeout(self.config.timeout, self.lookup.lookup(title)).await {
            Ok(Ok(Some(found))) => MetadataResult::from_match(found)
                .map_or(Lookup::Fallback(FallbackReason::NoMatch), Lookup::Found),
            Ok(Ok(None)) => Lookup::Fallback(FallbackReason::NoMatch),
            Ok(Err(e)) => Lookup::Fallback(FallbackReason::Failed(e.to_string())),
            Err(_) => Lookup::Fallback(FallbackReason::Timeout),
        }
    }

    fn fallback(&self) -> MetadataResult {
        MetadataResult::fallback(&self.config.placeholder_poster)
    }
}

fn log_fallback(title: &str, reason: &FallbackReason) {
    match reason {
        FallbackReason::NoMatch => debug!(title, "No metadata match"),
        FallbackReason::Timeout => debug!(title, "Metadata lookup timed out"),
        FallbackReason::Failed(error) => warn!(title, %error, "Metadata lookup failed"),
    }
}
