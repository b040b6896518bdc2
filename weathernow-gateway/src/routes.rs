use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use weathernow_core::{
    LocationParams, NewsProvider, QueryError, WeatherProvider,
    provider::{gnews::GNewsProvider, http_client, weatherapi::WeatherApiProvider},
};

use crate::{config::GatewayConfig, error::ApiError};

/// Shared, immutable handler state. Holds the only copies of the provider keys.
#[derive(Debug, Clone)]
pub struct AppState {
    pub weather: Arc<dyn WeatherProvider>,
    pub news: Arc<dyn NewsProvider>,
}

impl AppState {
    pub fn new(weather: Arc<dyn WeatherProvider>, news: Arc<dyn NewsProvider>) -> Self {
        Self { weather, news }
    }

    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        let http = http_client(config.upstream_timeout)
            .context("Failed to build HTTP client for upstream providers")?;

        let weather = WeatherApiProvider::new(config.weather_api_key.clone(), http.clone())
            .with_base_url(config.weather_base_url.as_str());
        let news = GNewsProvider::new(config.gnews_api_key.clone(), http)
            .with_base_url(config.gnews_base_url.as_str());

        Ok(Self::new(Arc::new(weather), Arc::new(news)))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    pub city: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/weather", get(weather))
        .route("/api/news", get(news))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn weather(
    State(state): State<AppState>,
    params: Result<Query<LocationParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    let query = params.resolve()?;
    info!(query = %query, "forwarding weather request");

    let body = state.weather.forecast(&query).await.map_err(ApiError::weather_upstream)?;
    Ok(Json(body))
}

async fn news(
    State(state): State<AppState>,
    params: Result<Query<NewsParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    let city = params
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(QueryError::MissingCity)?;
    info!(city = %city, "forwarding news request");

    let body = state.news.search(city).await.map_err(ApiError::news_upstream)?;
    Ok(Json(body))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
