pub mod catalog;
pub mod config;
pub mod enrich;
pub mod error;
pub mod logging;
pub mod provider;
pub mod routes;
pub mod services;
pub mod stream;

use std::sync::Arc;
use std::time::Duration;

use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::{
    catalog::SiteClient,
    config::AppConfig,
    enrich::{EnrichConfig, Enricher},
    error::VoidError,
    provider::{
        AniListProvider, CacheConfig, CachedLookup, MetadataLookup, TitleLookup, TmdbProvider,
        build_client,
    },
    services::{CatalogService, DownloadService},
    stream::{BrowserResolver, ChainResolver, PageScanResolver, SourceResolver, Transcoder},
};

/// Shared application context handed to every route
#[derive(Clone)]
pub struct Ctx {
    pub catalog: Arc<CatalogService>,
    pub downloads: Arc<DownloadService>,
}

/// Response envelope for every JSON route
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: Some(data),
        }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, VoidError>;

impl Ctx {
    /// Wire every collaborator from configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = build_client(&config.site.user_agent, config.site.request_timeout())?;

        let anilist: Arc<dyn MetadataLookup> = Arc::new(AniListProvider::with_base_url(
            client.clone(),
            &config.metadata.anilist_url,
        ));
        let lookup: Arc<dyn MetadataLookup> = if config.metadata.cache_ttl_secs > 0 {
            Arc::new(CachedLookup::with_config(
                anilist,
                CacheConfig {
                    max_entries: config.metadata.cache_capacity,
                    ttl: Duration::from_secs(config.metadata.cache_ttl_secs),
                },
            ))
        } else {
            anilist
        };

        let enricher = Enricher::with_config(
            lookup,
            EnrichConfig {
                concurrency: config.metadata.concurrency,
                timeout: config.metadata.timeout(),
                placeholder_poster: config.metadata.placeholder_poster.clone(),
            },
        );

        let site = SiteClient::new(
            client.clone(),
            &config.site.base_url,
            &config.site.user_agent,
        );
        let catalog = CatalogService::new(
            site,
            enricher,
            config.site.schedule_limit,
            config.site.search_limit,
        );

        let downloads = DownloadService::new(
            client.clone(),
            Self::resolver(config, &client),
            Self::titles(config, &client),
            Transcoder::new(&config.stream.ffmpeg_path, &config.stream.referer),
            &config.stream.referer,
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            downloads: Arc::new(downloads),
        })
    }

    fn resolver(config: &AppConfig, client: &reqwest::Client) -> Arc<dyn SourceResolver> {
        let stream = &config.stream;
        let mut resolvers: Vec<Arc<dyn SourceResolver>> = Vec::new();

        if let Some(browser) = stream.browser_command.as_deref().and_then(|command| {
            BrowserResolver::from_command_line(
                command,
                &stream.embed_base_url,
                stream.resolve_timeout(),
            )
        }) {
            resolvers.push(Arc::new(browser));
        } else {
            tracing::warn!("No browser helper configured, falling back to embed page scanning");
        }

        resolvers.push(Arc::new(PageScanResolver::new(
            client.clone(),
            &stream.embed_base_url,
            &stream.referer,
        )));

        Arc::new(ChainResolver::new(resolvers))
    }

    fn titles(config: &AppConfig, client: &reqwest::Client) -> Option<Arc<dyn TitleLookup>> {
        let key = config.tmdb.api_key.as_deref().filter(|k| !k.is_empty())?;
        Some(Arc::new(TmdbProvider::with_base_url(
            client.clone(),
            &config.tmdb.base_url,
            key,
        )))
    }
}

/// Build the HTTP application
pub fn app(ctx: Ctx) -> Router {
    routes::mount()
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
}
