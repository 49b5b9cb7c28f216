mod client;
mod extractor;
mod types;


pub use client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, SiteClient};
pub use extractor::Extractor;
pub use types::{Episode, Record};

/// Catalog result type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while fetching or extracting listing pages
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Parse error: {0}")]
    Parse(String),
}
