use super::{Result, StreamError};
use regex::Regex;
use reqwest::Url;
use serde::Serialize;
use std::sync::LazyLock;

static RESOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RESOLUTION=(\d+)x(\d+)").expect("Invalid resolution regex"));

/// One selectable variant of a master playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quality {
    /// `"<height>p"`, or `"Unknown"` when the variant declares no resolution
    pub quality: String,
    /// Absolute variant URL
    pub url: String,
}

impl Quality {
    fn from_stream_inf(attributes: &str, url: String) -> Self {
        let quality = RESOLUTION
            .captures(attributes)
            .and_then(|caps| caps.get(2))
            .map_or_else(|| "Unknown".to_string(), |h| format!("{}p", h.as_str()));

        Self { quality, url }
    }
}

/// List the variants of an HLS master playlist.
///
/// Variant URIs are resolved against `base`. A media playlist (segments,
/// no variants) is returned as a single `"Unknown"` variant pointing at
/// `base` itself.
pub fn parse_master(content: &str, base: &Url) -> Result<Vec<Quality>> {
    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());

    if lines.next() != Some("#EXTM3U") {
        return Err(StreamError::Playlist("missing #EXTM3U header".to_string()));
    }

    let mut qualities = Vec::new();
    let mut pending: Option<&str> = None;
    let mut has_segments = false;

    for line in lines {
        if let Some(attributes) = line.strip_prefix("#EXT-X-STREAM-INF:") {
            pending = Some(attributes);
        } else if line.starts_with("#EXTINF") {
            has_segments = true;
        } else if line.starts_with('#') {
            continue;
        } else if let Some(attributes) = pending.take() {
            let url = base
                .join(line)
                .map_err(|e| StreamError::Playlist(format!("bad variant URI {line}: {e}")))?;
            qualities.push(Quality::from_stream_inf(attributes, url.to_string()));
        }
    }

    if qualities.is_empty() && has_segments {
        qualities.push(Quality {
            quality: "Unknown".to_string(),
            url: base.to_string(),
        });
    }

    Ok(qualities)
}

/// Download and parse a master playlist
pub async fn fetch_qualities(
    client: &reqwest::Client,
    url: &str,
    referer: &str,
) -> Result<Vec<Quality>> {
    let base = Url::parse(url).map_err(|e| StreamError::InvalidUrl(format!("{url}: {e}")))?;

    let response = client
        .get(base.clone())
        .header(reqwest::header::REFERER, referer)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(StreamError::Playlist(format!(
            "playlist request returned {}",
            response.status()
        )));
    }

    let content = response.text().await?;
    parse_master(&content, &base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MASTER: &str = "#EXTM3U
#EXT-X-VERSION:3
#EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=640x360,CODECS=\"avc1.4d401e,mp4a.40.2\"
360/index.m3u8

#EXT-X-STREAM-INF:BANDWIDTH=2800000,RESOLUTION=1280x720
/hls/720/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=128000,CODECS=\"mp4a.40.2\"
https://audio.example/a.m3u8
";

    fn base() -> Url {
        Url::parse("https://cdn.example/movie/master.m3u8?token=t").unwrap()
    }

    #[test]
    fn test_parse_master_variants() {
        let qualities = parse_master(MASTER, &base()).unwrap();

        assert_eq!(
            qualities,
            vec![
                Quality {
                    quality: "360p".to_string(),
                    url: "https://cdn.example/movie/360/index.m3u8".to_string(),
                },
                Quality {
                    quality: "720p".to_string(),
                    url: "https://cdn.example/hls/720/index.m3u8".to_string(),
                },
                Quality {
                    quality: "Unknown".to_string(),
                    url: "https://audio.example/a.m3u8".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_media_playlist_is_single_variant() {
        let media = "#EXTM3U\n#EXT-X-TARGETDURATION:10\n#EXTINF:10.0,\nseg0.ts\n#EXT-X-ENDLIST\n";
        let qualities = parse_master(media, &base()).unwrap();

        assert_eq!(qualities.len(), 1);
        assert_eq!(qualities[0].quality, "Unknown");
        assert_eq!(qualities[0].url, base().to_string());
    }

    #[test]
    fn test_rejects_non_playlist() {
        let err = parse_master("<html>blocked</html>", &base()).unwrap_err();
        assert!(matches!(err, StreamError::Playlist(_)));
    }

    #[test]
    fn test_empty_master() {
        assert!(parse_master("#EXTM3U\n", &base()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_qualities() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/master.m3u8"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "#EXTM3U\n#EXT-X-STREAM-INF:RESOLUTION=1920x1080\nhi.m3u8\n",
            ))
            .mount(&server)
            .await;

        let url = format!("{}/master.m3u8", server.uri());
        let qualities = fetch_qualities(&reqwest::Client::new(), &url, "https://ref/")
            .await
            .unwrap();

        assert_eq!(qualities.len(), 1);
        assert_eq!(qualities[0].quality, "1080p");
        assert_eq!(qualities[0].url, format!("{}/hi.m3u8", server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_qualities_invalid_url() {
        let err = fetch_qualities(&reqwest::Client::new(), "not a url", "")
            .await
            .unwrap_err();
        assert!(matches!(err, StreamError::InvalidUrl(_)));
    }
}
