use super::api_types::TitleDetails;
use crate::provider::{HttpClient, MediaKind, ProviderError, Result, TitleLookup};
use async_trait::async_trait;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

pub struct TmdbProvider {
    client: HttpClient,
    api_key: String,
}

impl TmdbProvider {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, TMDB_BASE_URL, api_key)
    }

    pub fn with_base_url(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: HttpClient::new(client, base_url),
            api_key: api_key.into(),
        }
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        let mut params: Vec<(&str, &str)> = vec![("api_key", self.api_key.as_str())];
        params.extend_from_slice(extra_params);

        self.client.get_with_params(endpoint, &params).await
    }
}

#[async_trait]
impl TitleLookup for TmdbProvider {
    async fn title(&self, id: &str, kind: MediaKind) -> Result<String> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ProviderError::Parse(format!("Invalid TMDB ID: {id}")));
        }

        let endpoint = format!("/{}/{id}", kind.as_str());
        let details: TitleDetails = self.request(&endpoint, &[]).await?;

        details
            .title
            .or(details.name)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::NotFound(format!("No title for TMDB {kind} {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_movie_title() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/603"))
            .and(query_param("api_key", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 603,
                "title": "The Matrix"
            })))
            .mount(&server)
            .await;

        let tmdb = TmdbProvider::with_base_url(reqwest::Client::new(), server.uri(), "key");
        let title = tmdb.title("603", MediaKind::Movie).await.unwrap();

        assert_eq!(title, "The Matrix");
    }

    #[tokio::test]
    async fn test_tv_title_uses_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tv/1396"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1396,
                "name": "Breaking Bad"
            })))
            .mount(&server)
            .await;

        let tmdb = TmdbProvider::with_base_url(reqwest::Client::new(), server.uri(), "key");
        let title = tmdb.title("1396", MediaKind::Tv).await.unwrap();

        assert_eq!(title, "Breaking Bad");
    }

    #[tokio::test]
    async fn test_rejects_non_numeric_id() {
        let tmdb = TmdbProvider::with_base_url(reqwest::Client::new(), "http://unused", "key");
        let err = tmdb.title("../secret", MediaKind::Movie).await.unwrap_err();

        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[tokio::test]
    async fn test_api_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let tmdb = TmdbProvider::with_base_url(reqwest::Client::new(), server.uri(), "bad");
        let err = tmdb.title("603", MediaKind::Movie).await.unwrap_err();

        assert!(matches!(err, ProviderError::Api { status: 401, .. }));
    }
}
