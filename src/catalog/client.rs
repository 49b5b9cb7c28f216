use super::{CatalogError, Episode, Extractor, Record, Result};
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://hianime.to";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Body of the site's ajax endpoints
#[derive(Debug, Deserialize)]
struct HtmlFragment {
    #[serde(default)]
    html: String,
}

/// Fetches listing documents from the anime site
#[derive(Clone)]
pub struct SiteClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl SiteClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, user_agent: &str) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        }
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        if let Ok(value) = HeaderValue::from_str(&format!("{base_url}/home")) {
            headers.insert(REFERER, value);
        }

        Self {
            client,
            base_url,
            headers,
        }
    }

    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {url}");

        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response)
    }

    async fn fetch_fragment(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let fragment: HtmlFragment = self
            .fetch(path, params)
            .await?
            .json()
            .await
            .map_err(|e| CatalogError::Parse(format!("Invalid fragment payload: {e}")))?;

        Ok(fragment.html)
    }

    /// Raw schedule entries airing on `date`
    pub async fn schedule(&self, date: NaiveDate) -> Result<Vec<Record>> {
        let date = date.format("%Y-%m-%d").to_string();
        let html = self
            .fetch_fragment("/ajax/schedule/list", &[("tzOffset", "0"), ("date", &date)])
            .await?;

        Extractor::schedule(&html)
    }

    /// Raw search results for `keyword`
    pub async fn search(&self, keyword: &str) -> Result<Vec<Record>> {
        let html = self
            .fetch("/search", &[("keyword", keyword)])
            .await?
            .text()
            .await?;

        Extractor::search(&html)
    }

    /// Episode list of a show, by slug or numeric id
    pub async fn episodes(&self, anime_id: &str) -> Result<Vec<Episode>> {
        let numeric_id = urlencoding::encode(Extractor::numeric_id(anime_id));
        let html = self
            .fetch_fragment(&format!("/ajax/v2/episode/list/{numeric_id}"), &[])
            .await?;

        Extractor::episodes(&html)
    }
}
