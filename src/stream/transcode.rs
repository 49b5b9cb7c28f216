use super::{Result, StreamError};
use crate::provider::MediaKind;
use axum::body::Bytes;
use futures::Stream;
use reqwest::Url;
use std::pin::Pin;
use std::process::Stdio;
use std::task::{Context, Poll};
use tokio::process::{Child, ChildStdout, Command};
use tokio_util::io::ReaderStream;
use tracing::info;

/// Remuxes an HLS variant into fragmented MP4 on stdout
#[derive(Debug, Clone)]
pub struct Transcoder {
    ffmpeg: String,
    referer: String,
}

impl Transcoder {
    pub fn new(ffmpeg: impl Into<String>, referer: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            referer: referer.into(),
        }
    }

    /// ffmpeg arguments for `url`
    pub fn args(&self, url: &str) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-headers".to_string(),
            format!("Referer: {}\r\n", self.referer),
            "-i".to_string(),
            url.to_string(),
            "-c".to_string(),
            "copy".to_string(),
            "-bsf:a".to_string(),
            "aac_adtstoasc".to_string(),
            "-f".to_string(),
            "mp4".to_string(),
            "-movflags".to_string(),
            "frag_keyframe+empty_moov".to_string(),
            "pipe:1".to_string(),
        ]
    }

    /// Start ffmpeg for `url`. Only http(s) inputs are accepted.
    pub fn spawn(&self, url: &str) -> Result<TranscodeStream> {
        let parsed = Url::parse(url).map_err(|e| StreamError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StreamError::InvalidUrl(format!(
                "unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let mut child = Command::new(&self.ffmpeg)
            .args(self.args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| StreamError::Io(std::io::Error::other("ffmpeg stdout not captured")))?;

        info!("Started {} for {}", self.ffmpeg, parsed.host_str().unwrap_or_default());

        Ok(TranscodeStream {
            _child: child,
            inner: ReaderStream::new(stdout),
        })
    }
}

/// ffmpeg's stdout as a byte stream. Dropping it kills the process.
pub struct TranscodeStream {
    _child: Child,
    inner: ReaderStream<ChildStdout>,
}

impl Stream for TranscodeStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Attachment filename for a download, e.g. `Breaking Bad - S01E02 (720p).mp4`
pub fn download_filename(
    title: &str,
    kind: MediaKind,
    season: Option<&str>,
    episode: Option<&str>,
    quality: &str,
) -> String {
    let mut name: String = title
        .chars()
        .filter(|c| !matches!(c, '"' | '/' | '\\') && !c.is_control())
        .collect();
    if name.trim().is_empty() {
        name = "Video".to_string();
    }

    if kind == MediaKind::Tv {
        name = format!(
            "{} - S{}E{}",
            name.trim(),
            pad2(season.unwrap_or("1")),
            pad2(episode.unwrap_or("1"))
        );
    }

    let quality: String = quality
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    format!("{} ({quality}).mp4", name.trim())
}

fn pad2(value: &str) -> String {
    format!("{:0>2}", value.trim())
}
