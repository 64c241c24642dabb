//! HTTP routes: `/health`, `/api/plants`, `/api/weather`.
//!
//! Upstream calls are blocking, so each request hands them to the blocking
//! pool. Neither data route ever fails: a failed upstream is answered with
//! fallback data and a `200`.

use crate::config::UpstreamConfig;
use crate::upstream::{
    OpenWeatherClient, PlantSource, TrefleClient, WeatherSource, plants_or_fallback,
    weather_or_demo,
};
use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
};
use dg_core::{CatalogResponse, WeatherReport};
use std::sync::Arc;

// ─── Application state ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub plants: Arc<dyn PlantSource>,
    pub weather: Arc<dyn WeatherSource>,
}

impl AppState {
    pub fn new(plants: impl PlantSource + 'static, weather: impl WeatherSource + 'static) -> Self {
        Self {
            plants: Arc::new(plants),
            weather: Arc::new(weather),
        }
    }

    /// Live upstream clients built from configuration.
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(
            TrefleClient::from_config(config),
            OpenWeatherClient::from_config(config),
        )
    }
}

// ─── Router ──────────────────────────────────────────────────────────────

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/plants", get(get_plants))
        .route("/api/weather", get(get_weather))
        .with_state(state)
}

// ─── Handlers ────────────────────────────────────────────────────────────

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_plants(State(state): State<AppState>) -> Json<CatalogResponse> {
    let source = state.plants.clone();
    let response = tokio::task::spawn_blocking(move || plants_or_fallback(source.as_ref()))
        .await
        .unwrap_or_else(|err| {
            log::warn!("plant fetch task failed: {err}");
            CatalogResponse::fallback()
        });
    Json(response)
}

async fn get_weather(State(state): State<AppState>) -> Json<WeatherReport> {
    let source = state.weather.clone();
    let report = tokio::task::spawn_blocking(move || weather_or_demo(source.as_ref()))
        .await
        .unwrap_or_else(|err| {
            log::warn!("weather fetch task failed: {err}");
            WeatherReport::demo()
        });
    Json(report)
}
