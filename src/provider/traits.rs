use super::{MediaKind, MediaMatch, Result};
use async_trait::async_trait;

/// Looks up display metadata for a scraped title
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Provider identifier (e.g., "anilist")
    fn id(&self) -> &'static str;

    /// Find the best match for `title`.
    ///
    /// `Ok(None)` means the provider answered but knows no such title.
    async fn lookup(&self, title: &str) -> Result<Option<MediaMatch>>;
}

/// Resolves the display title of a movie or show by its database id
#[async_trait]
pub trait TitleLookup: Send + Sync {
    async fn title(&self, id: &str, kind: MediaKind) -> Result<String>;
}
