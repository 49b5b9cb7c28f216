use crate::catalog::{Episode, Result, SiteClient};
use crate::enrich::{EnrichedRecord, Enricher};
use chrono::NaiveDate;
use tracing::info;

/// Scrape-then-enrich pipelines behind the listing routes
pub struct CatalogService {
    site: SiteClient,
    enricher: Enricher,
    schedule_limit: usize,
    search_limit: usize,
}

impl CatalogService {
    #[must_use]
    pub const fn new(
        site: SiteClient,
        enricher: Enricher,
        schedule_limit: usize,
        search_limit: usize,
    ) -> Self {
        Self {
            site,
            enricher,
            schedule_limit,
            search_limit,
        }
    }

    /// Shows airing on `date`, at most `schedule_limit` of them
    pub async fn schedule(&self, date: NaiveDate) -> Result<Vec<EnrichedRecord>> {
        let mut records = self.site.schedule(date).await?;
        records.truncate(self.schedule_limit);

        info!("Schedule for {date}: {} entries", records.len());
        Ok(self.enricher.enrich(records).await)
    }

    /// Search results for `keyword`, at most `search_limit` of them
    pub async fn search(&self, keyword: &str) -> Result<Vec<EnrichedRecord>> {
        let mut records = self.site.search(keyword).await?;
        records.truncate(self.search_limit);

        info!("Search '{keyword}': {} results", records.len());
        Ok(self.enricher.enrich(records).await)
    }

    /// Episode list of a show
    pub async fn episodes(&self, anime_id: &str) -> Result<Vec<Episode>> {
        self.site.episodes(anime_id).await
    }
}
