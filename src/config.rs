//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional `config.toml`
//! (path from `VOID_CONFIG`), then `VOID__SECTION__KEY` environment
//! variables.

use crate::catalog::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::enrich::PLACEHOLDER_POSTER;
use crate::provider::anilist::ANILIST_API_URL;
use crate::provider::tmdb::TMDB_BASE_URL;
use crate::stream::DEFAULT_EMBED_BASE_URL;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub metadata: MetadataConfig,
    pub tmdb: TmdbConfig,
    pub stream: StreamConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("VOID_CONFIG").unwrap_or_else(|_| "config".to_string());
        Self::load_from(&path)
    }

    /// Load configuration using `path` as the optional config file
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("VOID")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
        }
    }
}

/// Listing site settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Schedule entries enriched per request
    pub schedule_limit: usize,
    /// Search results enriched per request
    pub search_limit: usize,
    /// Overall timeout for outbound requests, in seconds
    pub request_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            schedule_limit: 15,
            search_limit: 10,
            request_timeout_secs: 30,
        }
    }
}

impl SiteConfig {
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Metadata enrichment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub anilist_url: String,
    /// Per-lookup deadline, in milliseconds
    pub timeout_ms: u64,
    /// Lookups in flight per batch
    pub concurrency: usize,
    pub placeholder_poster: String,
    /// Zero disables the lookup cache
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            anilist_url: ANILIST_API_URL.to_string(),
            timeout_ms: 2000,
            concurrency: 5,
            placeholder_poster: PLACEHOLDER_POSTER.to_string(),
            cache_ttl_secs: 21600,
            cache_capacity: 2000,
        }
    }
}

impl MetadataConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    pub base_url: String,
    /// Without a key, downloads are named "Video"
    pub api_key: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: TMDB_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

/// Stream resolution and transcoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub embed_base_url: String,
    /// Referer sent with playlist and segment requests
    pub referer: String,
    /// Headless-browser helper command line; the embed URL is appended
    pub browser_command: Option<String>,
    pub resolve_timeout_secs: u64,
    pub ffmpeg_path: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            embed_base_url: DEFAULT_EMBED_BASE_URL.to_string(),
            referer: format!("{DEFAULT_EMBED_BASE_URL}/"),
            browser_command: None,
            resolve_timeout_secs: 60,
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }
}

impl StreamConfig {
    pub const fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Also write daily-rolling log files into this directory
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            directory: None,
        }
    }
}
