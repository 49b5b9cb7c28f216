use crate::provider::{MediaKind, TitleLookup};
use crate::stream::{
    Quality, Result, SourceRequest, SourceResolver, StreamError, TranscodeStream, Transcoder,
    download_filename, fetch_qualities,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Stream resolution and download pipelines
pub struct DownloadService {
    client: reqwest::Client,
    resolver: Arc<dyn SourceResolver>,
    titles: Option<Arc<dyn TitleLookup>>,
    transcoder: Transcoder,
    referer: String,
}

impl DownloadService {
    pub fn new(
        client: reqwest::Client,
        resolver: Arc<dyn SourceResolver>,
        titles: Option<Arc<dyn TitleLookup>>,
        transcoder: Transcoder,
        referer: impl Into<String>,
    ) -> Self {
        Self {
            client,
            resolver,
            titles,
            transcoder,
            referer: referer.into(),
        }
    }

    /// Resolve the master playlist for `request` and list its qualities
    pub async fn qualities(&self, request: &SourceRequest) -> Result<Vec<Quality>> {
        let master = self
            .resolver
            .resolve(request)
            .await?
            .ok_or(StreamError::NotFound)?;

        info!("Resolved master playlist for TMDB {}", request.tmdb_id);
        fetch_qualities(&self.client, &master, &self.referer).await
    }

    /// Attachment filename, falling back to "Video" when the title is unknown
    pub async fn filename(
        &self,
        tmdb_id: Option<&str>,
        kind: MediaKind,
        season: Option<&str>,
        episode: Option<&str>,
        quality: &str,
    ) -> String {
        let title = match (self.titles.as_ref(), tmdb_id) {
            (Some(titles), Some(id)) => match titles.title(id, kind).await {
                Ok(title) => title,
                Err(e) => {
                    debug!("Title lookup for {kind} {id} failed: {e}");
                    "Video".to_string()
                }
            },
            _ => "Video".to_string(),
        };

        download_filename(&title, kind, season, episode, quality)
    }

    /// Start remuxing the variant at `url`
    pub fn stream(&self, url: &str) -> Result<TranscodeStream> {
        self.transcoder.spawn(url)
    }
}
