//! Integration tests: proxy routes against stub upstreams.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use dg_core::catalog::CatalogMeta;
use dg_core::{CatalogResponse, CatalogSource, FetchError, PlantRecord, WeatherReport};
use dg_server::{AppState, PlantSource, WeatherSource, create_router};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt; // for oneshot

// ─── Stub upstreams ─────────────────────────────────────────────────────

struct LivePlants;

impl PlantSource for LivePlants {
    fn fetch_plants(&self) -> Result<CatalogResponse, FetchError> {
        Ok(CatalogResponse::live(
            vec![PlantRecord::new(42, "Foxglove", "Digitalis purpurea", "Plantaginaceae")],
            CatalogMeta { total: Some(1) },
        ))
    }
}

struct FailingPlants(fn() -> FetchError);

impl PlantSource for FailingPlants {
    fn fetch_plants(&self) -> Result<CatalogResponse, FetchError> {
        Err((self.0)())
    }
}

struct FixedWeather(Option<WeatherReport>);

impl WeatherSource for FixedWeather {
    fn fetch_weather(&self) -> Result<WeatherReport, FetchError> {
        self.0.clone().ok_or(FetchError::Status(401))
    }
}

fn app(plants: impl PlantSource + 'static, weather: Option<WeatherReport>) -> axum::Router {
    create_router(AppState::new(plants, FixedWeather(weather)))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// ─── Health ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_check() {
    let (status, body) = get_json(app(LivePlants, None), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

// ─── Plants ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn live_plants_are_forwarded() {
    let (status, body) = get_json(app(LivePlants, None), "/api/plants").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "live");
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["plants"][0]["common_name"], "Foxglove");
}

#[tokio::test]
async fn failing_upstream_serves_fallback() {
    let failures: [fn() -> FetchError; 4] = [
        || FetchError::Timeout,
        || FetchError::Status(503),
        || FetchError::InvalidPayload("no data".into()),
        || FetchError::NotConfigured("TREFLE_TOKEN"),
    ];
    for failure in failures {
        let (status, body) = get_json(app(FailingPlants(failure), None), "/api/plants").await;
        assert_eq!(status, StatusCode::OK);

        let response: CatalogResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.source, CatalogSource::Fallback);
        assert_eq!(response.plants.len(), 15);
        assert_eq!(response.meta.total, Some(15));
        assert_eq!(response.plants[0].common_name, "Rose");
        assert_eq!(response.plants[14].common_name, "Sweet Alyssum");
    }
}

// ─── Weather ────────────────────────────────────────────────────────────

#[tokio::test]
async fn weather_is_forwarded() {
    let report = WeatherReport::new("Oslo", 4.0, 70.0);
    let (status, body) = get_json(app(LivePlants, Some(report.clone())), "/api/weather").await;
    assert_eq!(status, StatusCode::OK);
    let parsed: WeatherReport = serde_json::from_value(body).unwrap();
    assert_eq!(parsed, report);
}

#[tokio::test]
async fn failing_weather_serves_demo_report() {
    let (status, body) = get_json(app(LivePlants, None), "/api/weather").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Demo Location");
    assert_eq!(body["main"]["temp"], 22.0);
    assert_eq!(body["main"]["humidity"], 65.0);
    assert_eq!(body["weather"][0]["description"], "clear sky");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = app(LivePlants, None)
        .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
