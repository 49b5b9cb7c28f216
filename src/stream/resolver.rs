use super::{Result, StreamError};
use async_trait::async_trait;
use regex::Regex;
use std::process::Stdio;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

pub const DEFAULT_EMBED_BASE_URL: &str = "https://www.2embed.cc";

static PLAYLIST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s"'<>\\]+?\.m3u8[^\s"'<>\\]*"#).expect("Invalid playlist regex")
});

/// Find the first HLS playlist URL in a blob of text
pub fn find_playlist_url(text: &str) -> Option<String> {
    let text = text.replace("\\/", "/");
    PLAYLIST_URL.find(&text).map(|m| m.as_str().to_string())
}

/// What to resolve: a movie, or one episode of a show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    pub tmdb_id: String,
    pub season: Option<String>,
    pub episode: Option<String>,
}

impl SourceRequest {
    pub fn movie(tmdb_id: impl Into<String>) -> Self {
        Self {
            tmdb_id: tmdb_id.into(),
            season: None,
            episode: None,
        }
    }

    pub fn episode(
        tmdb_id: impl Into<String>,
        season: impl Into<String>,
        episode: impl Into<String>,
    ) -> Self {
        Self {
            tmdb_id: tmdb_id.into(),
            season: Some(season.into()),
            episode: Some(episode.into()),
        }
    }

    /// Embed page URL for this request. A season without an episode means episode 1.
    pub fn embed_url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        let id = urlencoding::encode(&self.tmdb_id);

        match self.season {
            Some(ref season) => {
                let episode = self.episode.as_deref().unwrap_or("1");
                format!(
                    "{base}/embedtv/{id}&s={}&e={}",
                    urlencoding::encode(season),
                    urlencoding::encode(episode)
                )
            }
            None => format!("{base}/embed/{id}"),
        }
    }
}

/// Finds the master playlist behind an embed page
#[async_trait]
pub trait SourceResolver: Send + Sync {
    /// Resolver name for logs
    fn name(&self) -> &'static str;

    async fn resolve(&self, request: &SourceRequest) -> Result<Option<String>>;
}

/// Fetches the embed page and scans its body for a playlist URL.
///
/// Works for hosts that inline the playlist; players that build it in
/// script need the browser helper.
pub struct PageScanResolver {
    client: reqwest::Client,
    embed_base_url: String,
    referer: String,
}

impl PageScanResolver {
    pub fn new(
        client: reqwest::Client,
        embed_base_url: impl Into<String>,
        referer: impl Into<String>,
    ) -> Self {
        Self {
            client,
            embed_base_url: embed_base_url.into(),
            referer: referer.into(),
        }
    }
}

#[async_trait]
impl SourceResolver for PageScanResolver {
    fn name(&self) -> &'static str {
        "page-scan"
    }

    async fn resolve(&self, request: &SourceRequest) -> Result<Option<String>> {
        let url = request.embed_url(&self.embed_base_url);
        debug!("Scanning embed page {url}");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::REFERER, &self.referer)
            .send()
            .await?;

        if !response.status().is_success() {
            debug!("Embed page returned {}", response.status());
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(find_playlist_url(&body))
    }
}

/// Runs an external headless-browser helper against the embed page.
///
/// The helper receives the embed URL as its last argument and prints every
/// request URL the page makes, one per line. The first playlist URL wins.
pub struct BrowserResolver {
    program: String,
    args: Vec<String>,
    embed_base_url: String,
    timeout: Duration,
}

impl BrowserResolver {
    /// Build from a whitespace separated command line
    pub fn from_command_line(
        command: &str,
        embed_base_url: impl Into<String>,
        timeout: Duration,
    ) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;

        Some(Self {
            program,
            args: parts.collect(),
            embed_base_url: embed_base_url.into(),
            timeout,
        })
    }

    async fn watch(&self, url: &str) -> Result<Option<String>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| StreamError::Browser(format!("failed to start {}: {e}", self.program)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| StreamError::Browser("helper stdout not captured".to_string()))?;
        let mut lines = BufReader::new(stdout).lines();

        while let Some(line) = lines.next_line().await? {
            if line.contains(".m3u8") {
                return Ok(find_playlist_url(&line).or_else(|| Some(line.trim().to_string())));
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            warn!("Browser helper exited with {status}");
        }

        Ok(None)
    }
}

#[async_trait]
impl SourceResolver for BrowserResolver {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn resolve(&self, request: &SourceRequest) -> Result<Option<String>> {
        let url = request.embed_url(&self.embed_base_url);
        info!("Resolving stream for {url} with browser helper");

        match tokio::time::timeout(self.timeout, self.watch(&url)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Browser helper timed out after {:?}", self.timeout);
                Ok(None)
            }
        }
    }
}

/// Tries resolvers in order until one finds a playlist
pub struct ChainResolver {
    resolvers: Vec<Arc<dyn SourceResolver>>,
}

impl ChainResolver {
    pub fn new(resolvers: Vec<Arc<dyn SourceResolver>>) -> Self {
        Self { resolvers }
    }
}

#[async_trait]
impl SourceResolver for ChainResolver {
    fn name(&self) -> &'static str {
        "chain"
    }

    async fn resolve(&self, request: &SourceRequest) -> Result<Option<String>> {
        for resolver in &self.resolvers {
            match resolver.resolve(request).await {
                Ok(Some(url)) => {
                    debug!("{} resolved {}", resolver.name(), url);
                    return Ok(Some(url));
                }
                Ok(None) => debug!("{} found no stream", resolver.name()),
                Err(e) => warn!("{} failed: {}", resolver.name(), e),
            }
        }

        Ok(None)
    }
}
