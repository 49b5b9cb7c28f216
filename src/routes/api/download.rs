use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    ApiResponse, ApiResult, Ctx,
    error::VoidError,
    provider::MediaKind,
    stream::{Quality, SourceRequest},
};

/// Quality listing parameters
#[derive(Debug, Deserialize)]
pub struct OptionsQuery {
    /// TMDB id
    pub id: Option<String>,
    /// Season, only for shows
    pub s: Option<String>,
    /// Episode, only for shows
    pub e: Option<String>,
}

/// Download parameters
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    /// Variant playlist URL from /api/options
    pub url: Option<String>,
    pub tmdb_id: Option<String>,
    /// movie or tv (default: movie)
    pub media_type: Option<String>,
    /// Label used in the filename (default: 720p)
    pub quality: Option<String>,
    pub s: Option<String>,
    pub e: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// List the qualities available for a movie or episode
/// GET /api/options?id=...&s=...&e=...
async fn options(
    State(ctx): State<Ctx>,
    Query(params): Query<OptionsQuery>,
) -> ApiResult<Vec<Quality>> {
    let id = non_empty(params.id.as_deref())
        .ok_or_else(|| VoidError::BadRequest("Missing id".to_string()))?;

    let request = match non_empty(params.s.as_deref()) {
        Some(season) => SourceRequest {
            tmdb_id: id.to_string(),
            season: Some(season.to_string()),
            episode: non_empty(params.e.as_deref()).map(str::to_string),
        },
        None => SourceRequest::movie(id),
    };

    let qualities = ctx.downloads.qualities(&request).await?;

    Ok(Json(ApiResponse::success("Qualities listed", qualities)))
}

/// Stream a variant as an MP4 attachment
/// GET /api/download?url=...&tmdb_id=...&media_type=...&quality=...&s=...&e=...
async fn download(
    State(ctx): State<Ctx>,
    Query(params): Query<DownloadQuery>,
) -> Result<Response, VoidError> {
    let url = non_empty(params.url.as_deref())
        .ok_or_else(|| VoidError::BadRequest("Missing url".to_string()))?;

    let kind = match non_empty(params.media_type.as_deref()) {
        Some(kind) => kind.parse::<MediaKind>().map_err(VoidError::BadRequest)?,
        None => MediaKind::Movie,
    };
    let quality = non_empty(params.quality.as_deref()).unwrap_or("720p");

    let stream = ctx.downloads.stream(url)?;
    let filename = ctx
        .downloads
        .filename(
            non_empty(params.tmdb_id.as_deref()),
            kind,
            non_empty(params.s.as_deref()),
            non_empty(params.e.as_deref()),
            quality,
        )
        .await;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"Video.mp4\""));

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("video/mp4")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// Mount download routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/options", get(options))
        .route("/download", get(download))
}
