//! Stream resolution, quality listing and transcoding.

mod playlist;
mod resolver;
mod transcode;

pub use playlist::{Quality, fetch_qualities, parse_master};
pub use resolver::{
    BrowserResolver, ChainResolver, DEFAULT_EMBED_BASE_URL, PageScanResolver, SourceRequest,
    SourceResolver, find_playlist_url,
};
pub use transcode::{TranscodeStream, Transcoder, download_filename};

/// Stream result type
pub type Result<T> = std::result::Result<T, StreamError>;

/// Stream error types
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No stream found")]
    NotFound,

    #[error("Invalid stream URL: {0}")]
    InvalidUrl(String),

    #[error("Playlist error: {0}")]
    Playlist(String),

    #[error("Browser helper error: {0}")]
    Browser(String),
}
