pub mod anilist;
mod cache;
mod http;
pub mod tmdb;
mod traits;
mod types;

pub use anilist::AniListProvider;
pub use cache::{CacheConfig, CachedLookup};
pub use http::{HttpClient, build_client};
pub use tmdb::TmdbProvider;
pub use traits::{MetadataLookup, TitleLookup};
pub use types::{MediaKind, MediaMatch};

/// Provider result type
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
