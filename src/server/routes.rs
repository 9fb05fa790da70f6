use axum::{
    extract::{Query, State},
    response::{Json, Response},
};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::response::{
    xml, ApiError, ARTICLE_ERROR, ARTICLE_NOT_FOUND, MATCHES_ERROR, RSS_ERROR, STANDINGS_ERROR,
    WEATHER_ERROR,
};
use super::state::AppState;
use crate::cache::{CachedResource, CachedResponse};
use crate::error::DashboardError;
use crate::football::{MatchPayload, StandingsPayload};
use crate::upstream::{article, weather};

/// A missing `city` is sent upstream as an empty `q=`, leaving the answer to the weather API.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticleQuery {
    pub url: Option<String>,
}

fn note_degraded<T: Clone + Send + Sync>(resource: &CachedResource<T>, cached: &CachedResponse<T>) {
    if cached.is_degraded() {
        warn!("⚠️ Answering with stale {} data", resource.name());
    }
}

/// Raw news feed XML
pub async fn rss(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let cached = state.news.get().await.map_err(|e| {
        error!("❌ RSS feed unavailable: {}", e);
        ApiError::fallback(RSS_ERROR, e)
    })?;
    note_degraded(&state.news, &cached);
    Ok(xml(cached.value))
}

/// Current weather, passed through from the upstream API
pub async fn weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<Value>, ApiError> {
    let config = &state.config;
    weather::fetch_weather(
        &state.client,
        &config.weather_api_url,
        config.weather_api_key.as_deref(),
        &query.city,
    )
    .await
    .map(Json)
    .map_err(|e| {
        error!("❌ Weather request for '{}' failed: {}", query.city, e);
        ApiError::internal(WEATHER_ERROR)
    })
}

/// Opening paragraph of a news article
pub async fn article_content(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<Value>, ApiError> {
    let url = query.url.unwrap_or_default();

    match article::fetch_article_content(&state.client, &url).await {
        Ok(content) => Ok(Json(json!({ "content": content }))),
        Err(DashboardError::ContentNotFound(_)) => {
            info!("No article content region at {}", url);
            Err(ApiError::not_found(ARTICLE_NOT_FOUND))
        }
        Err(e) => {
            error!("❌ Fetching article {} failed: {}", url, e);
            Err(ApiError::internal(ARTICLE_ERROR))
        }
    }
}

pub async fn standings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StandingsPayload>, ApiError> {
    let cached = state.standings.get().await.map_err(|e| {
        error!("❌ Standings unavailable: {}", e);
        ApiError::fallback(STANDINGS_ERROR, e)
    })?;
    note_degraded(&state.standings, &cached);
    Ok(Json(cached.value))
}

pub async fn matches(State(state): State<Arc<AppState>>) -> Result<Json<MatchPayload>, ApiError> {
    let cached = state.matches.get().await.map_err(|e| {
        error!("❌ Match data unavailable: {}", e);
        ApiError::fallback(MATCHES_ERROR, e)
    })?;
    note_degraded(&state.matches, &cached);
    Ok(Json(cached.value))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "club-dashboard",
        "timestamp": chrono::Utc::now().timestamp(),
        "caches": state.cache_statuses().await,
    }))
}
