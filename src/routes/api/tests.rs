//! API route tests

#[cfg(test)]
mod route_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{
        Ctx,
        catalog::SiteClient,
        enrich::{EnrichConfig, Enricher, PLACEHOLDER_POSTER},
        provider::{MediaMatch, MetadataLookup, Result as ProviderResult},
        services::{CatalogService, DownloadService},
        stream::{Result as StreamResult, SourceRequest, SourceResolver, Transcoder},
    };

    struct TitleLength;

    #[async_trait]
    impl MetadataLookup for TitleLength {
        fn id(&self) -> &'static str {
            "title-length"
        }

        async fn lookup(&self, title: &str) -> ProviderResult<Option<MediaMatch>> {
            if title.contains("Unknown") {
                return Ok(None);
            }
            Ok(Some(MediaMatch {
                id: title.len() as i64,
                poster: Some(format!("https://img/{}.jpg", title.len())),
                banner: Some("https://img/banner.jpg".to_string()),
                score: Some(75),
                year: Some(1999),
            }))
        }
    }

    struct FixedResolver(Option<String>);

    #[async_trait]
    impl SourceResolver for FixedResolver {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn resolve(&self, _request: &SourceRequest) -> StreamResult<Option<String>> {
            Ok(self.0.clone())
        }
    }

    fn ctx(site: &MockServer, master: Option<String>) -> Ctx {
        let client = reqwest::Client::new();
        let enricher = Enricher::with_config(
            Arc::new(TitleLength),
            EnrichConfig {
                timeout: Duration::from_secs(1),
                ..Default::default()
            },
        );
        let catalog = CatalogService::new(
            SiteClient::new(client.clone(), site.uri(), "test-agent"),
            enricher,
            15,
            2,
        );
        let downloads = DownloadService::new(
            client,
            Arc::new(FixedResolver(master)),
            None,
            Transcoder::new("ffmpeg", "https://ref/"),
            "https://ref/",
        );

        Ctx {
            catalog: Arc::new(catalog),
            downloads: Arc::new(downloads),
        }
    }

    async fn get(ctx: Ctx, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = crate::app(ctx)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        (status, json)
    }

    #[tokio::test]
    async fn test_home() {
        let site = MockServer::start().await;
        let response = crate::app(ctx(&site, None))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Void API is Running.");
    }

    #[tokio::test]
    async fn test_health() {
        let site = MockServer::start().await;
        let (status, json) = get(ctx(&site, None), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["code"], 200);
        assert_eq!(json["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let site = MockServer::start().await;

        let (status, json) = get(ctx(&site, None), "/api/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], 400);
        assert!(json["data"].is_null());

        let (status, _) = get(ctx(&site, None), "/api/search?q=%20%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_enriches_and_caps_results() {
        let site = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("keyword", "naruto"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"
                <div class="flw-item"><h3 class="film-name"><a href="/naruto-677">Naruto</a></h3></div>
                <div class="flw-item"><h3 class="film-name"><a href="/unknown-1">Unknown Thing</a></h3></div>
                <div class="flw-item"><h3 class="film-name"><a href="/boruto-8143">Boruto</a></h3></div>
                "#,
            ))
            .mount(&site)
            .await;

        let (status, json) = get(ctx(&site, None), "/api/search?q=naruto").await;

        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);

        assert_eq!(data[0]["id"], "677");
        assert_eq!(data[0]["full_id"], "naruto-677");
        assert_eq!(data[0]["poster"], "https://img/6.jpg");
        assert_eq!(data[0]["score"], 75);
        assert_eq!(data[0]["al_id"], 6);

        assert_eq!(data[1]["id"], "1");
        assert_eq!(data[1]["poster"], PLACEHOLDER_POSTER);
        assert_eq!(data[1]["score"], "N/A");
        assert_eq!(data[1]["year"], "N/A");
        assert!(data[1]["al_id"].is_null());
    }

    #[tokio::test]
    async fn test_search_upstream_failure_is_bad_gateway() {
        let site = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&site)
            .await;

        let (status, json) = get(ctx(&site, None), "/api/search?q=x").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["code"], 502);
    }

    #[tokio::test]
    async fn test_schedule_for_date() {
        let site = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ajax/schedule/list"))
            .and(query_param("date", "2024-03-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "html": "<li><div class=\"time\">12:00</div><h3 class=\"film-name\"><a href=\"/bleach-806\">Bleach</a></h3></li>"
            })))
            .mount(&site)
            .await;

        let (status, json) = get(ctx(&site, None), "/api/schedule?date=2024-03-01").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["title"], "Bleach");
        assert_eq!(json["data"][0]["time"], "12:00");
        assert_eq!(json["data"][0]["year"], 1999);
    }

    #[tokio::test]
    async fn test_schedule_rejects_bad_date() {
        let site = MockServer::start().await;
        let (status, _) = get(ctx(&site, None), "/api/schedule?date=yesterday").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_episodes() {
        let site = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ajax/v2/episode/list/100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "html": "<a class=\"ep-item\" data-number=\"1\" data-id=\"2142\" title=\"Romance Dawn\"></a>"
            })))
            .mount(&site)
            .await;

        let (status, json) = get(ctx(&site, None), "/api/episodes/one-piece-100").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["number"], "1");
        assert_eq!(json["data"][0]["title"], "Romance Dawn");
    }

    #[tokio::test]
    async fn test_options_without_stream_is_not_found() {
        let site = MockServer::start().await;
        let (status, json) = get(ctx(&site, None), "/api/options?id=603").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "No stream found");
    }

    #[tokio::test]
    async fn test_options_requires_id() {
        let site = MockServer::start().await;
        let (status, _) = get(ctx(&site, None), "/api/options").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_options_lists_qualities() {
        let cdn = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/master.m3u8"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "#EXTM3U\n#EXT-X-STREAM-INF:RESOLUTION=1280x720\n720.m3u8\n#EXT-X-STREAM-INF:RESOLUTION=1920x1080\n1080.m3u8\n",
            ))
            .mount(&cdn)
            .await;

        let master = format!("{}/master.m3u8", cdn.uri());
        let (status, json) = get(ctx(&cdn, Some(master)), "/api/options?id=1396&s=1&e=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["quality"], "720p");
        assert_eq!(json["data"][0]["url"], format!("{}/720.m3u8", cdn.uri()));
        assert_eq!(json["data"][1]["quality"], "1080p");
    }

    #[tokio::test]
    async fn test_download_validates_input() {
        let site = MockServer::start().await;

        let (status, _) = get(ctx(&site, None), "/api/download").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get(ctx(&site, None), "/api/download?url=file:///etc/passwd").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get(
            ctx(&site, None),
            "/api/download?url=https://cdn/a.m3u8&media_type=book",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_streams_attachment() {
        let site = MockServer::start().await;
        let mut ctx = ctx(&site, None);
        ctx.downloads = Arc::new(DownloadService::new(
            reqwest::Client::new(),
            Arc::new(FixedResolver(None)),
            None,
            Transcoder::new("echo", "https://ref/"),
            "https://ref/",
        ));

        let response = crate::app(ctx)
            .oneshot(
                Request::builder()
                    .uri("/api/download?url=https://cdn.example/720.m3u8&media_type=tv&s=1&e=3&quality=720p")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "video/mp4");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Video - S01E03 (720p).mp4\""
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("https://cdn.example/720.m3u8"));
    }
}
