use super::api_types::{GraphQLResponse, Media, MediaData};
use crate::provider::{HttpClient, MediaMatch, MetadataLookup, ProviderError, Result};
use async_trait::async_trait;

pub const ANILIST_API_URL: &str = "https://graphql.anilist.co";

const SEARCH_QUERY: &str = r#"
    query ($search: String) {
        Media(search: $search, type: ANIME) {
            id
            coverImage { large }
            bannerImage
            averageScore
            startDate { year }
        }
    }
"#;

pub struct AniListProvider {
    client: HttpClient,
}

impl AniListProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, ANILIST_API_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(client, base_url),
        }
    }

    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables
        });

        let response: GraphQLResponse<T> = self.client.post_json("", &body).await?;

        if let Some(errors) = response.errors
            && let Some(error) = errors.first()
        {
            return Err(ProviderError::Api {
                status: error.status.unwrap_or(400),
                message: error.message.clone(),
            });
        }

        response
            .data
            .ok_or_else(|| ProviderError::Parse("No data in response".to_string()))
    }

    fn media_to_match(media: Media) -> MediaMatch {
        MediaMatch {
            id: media.id,
            poster: media.cover_image.and_then(|c| c.large),
            banner: media.banner_image,
            score: media.average_score,
            year: media.start_date.and_then(|d| d.year),
        }
    }
}

#[async_trait]
impl MetadataLookup for AniListProvider {
    fn id(&self) -> &'static str {
        "anilist"
    }

    async fn lookup(&self, title: &str) -> Result<Option<MediaMatch>> {
        let variables = serde_json::json!({ "search": title });

        // AniList answers an unknown title with HTTP 404 plus a GraphQL error
        match self.query::<MediaData>(SEARCH_QUERY, variables).await {
            Ok(data) => Ok(data.media.map(Self::media_to_match)),
            Err(ProviderError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
