use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::{
    ApiResponse, ApiResult, Ctx,
    catalog::Episode,
    enrich::EnrichedRecord,
    error::VoidError,
};

/// Schedule request parameters
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// Day to list, `YYYY-MM-DD`. Defaults to today.
    pub date: Option<String>,
}

/// Search request parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Shows airing on a day, with metadata
/// GET /api/schedule?date=...
async fn schedule(
    State(ctx): State<Ctx>,
    Query(params): Query<ScheduleQuery>,
) -> ApiResult<Vec<EnrichedRecord>> {
    let date = match params.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| VoidError::BadRequest(format!("Invalid date: {date}")))?,
        None => Local::now().date_naive(),
    };

    let data = ctx.catalog.schedule(date).await?;

    Ok(Json(ApiResponse::success("Schedule retrieved", data)))
}

/// Search shows by keyword, with metadata
/// GET /api/search?q=...
async fn search(
    State(ctx): State<Ctx>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<EnrichedRecord>> {
    let keyword = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| VoidError::BadRequest("Missing search query".to_string()))?;

    let data = ctx.catalog.search(keyword).await?;

    Ok(Json(ApiResponse::success("Search completed", data)))
}

/// Episode list of a show
/// GET /api/episodes/{anime_id}
async fn episodes(State(ctx): State<Ctx>, Path(anime_id): Path<String>) -> ApiResult<Vec<Episode>> {
    let data = ctx.catalog.episodes(&anime_id).await?;

    Ok(Json(ApiResponse::success("Episodes retrieved", data)))
}

/// Mount catalog routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/schedule", get(schedule))
        .route("/search", get(search))
        .route("/episodes/{anime_id}", get(episodes))
}
