//! Upstream data sources: the plant catalog API and the weather API.
//!
//! Both are blocking `ureq` clients with a global timeout per request and
//! no retries. Callers run them on the blocking pool and substitute fixed
//! fallback data on any `FetchError`.

use crate::config::UpstreamConfig;
use dg_core::catalog::CatalogMeta;
use dg_core::{CatalogResponse, FetchError, PlantRecord, WeatherReport};
use serde::Deserialize;
use std::time::Duration;

pub const PLANTS_URL: &str = "https://trefle.io/api/v1/plants";
pub const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const PAGE_SIZE: u32 = 30;
pub const USER_AGENT: &str = "DreamGarden/1.0";

/// Something that can list plants for the catalog.
pub trait PlantSource: Send + Sync {
    fn fetch_plants(&self) -> Result<CatalogResponse, FetchError>;
}

/// Something that can report the current weather.
pub trait WeatherSource: Send + Sync {
    fn fetch_weather(&self) -> Result<WeatherReport, FetchError>;
}

/// Live catalog, or the 15 fallback records on any failure.
pub fn plants_or_fallback(source: &dyn PlantSource) -> CatalogResponse {
    source.fetch_plants().unwrap_or_else(|err| {
        log::warn!("using fallback plants: {err}");
        CatalogResponse::fallback()
    })
}

/// Live weather, or the demo report on any failure.
pub fn weather_or_demo(source: &dyn WeatherSource) -> WeatherReport {
    source.fetch_weather().unwrap_or_else(|err| {
        match &err {
            FetchError::NotConfigured(_) => log::debug!("serving demo weather: {err}"),
            _ => log::warn!("serving demo weather: {err}"),
        }
        WeatherReport::demo()
    })
}

fn agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

fn fetch_error(err: ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(status) => FetchError::Status(status),
        ureq::Error::Timeout(_) => FetchError::Timeout,
        ureq::Error::Json(e) => FetchError::InvalidPayload(e.to_string()),
        other => FetchError::Network(other.to_string()),
    }
}

// ─── Plant catalog ───────────────────────────────────────────────────────

/// Raw `/plants` payload. `data` must be present for the response to count.
#[derive(Deserialize)]
struct PlantPage {
    data: Option<Vec<PlantRecord>>,
    meta: Option<CatalogMeta>,
}

pub struct TrefleClient {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl TrefleClient {
    pub fn new(token: Option<String>, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            base_url: PLANTS_URL.to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(config.trefle_token.clone(), config.fetch_timeout())
    }

    /// Point the client at a different endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl PlantSource for TrefleClient {
    fn fetch_plants(&self) -> Result<CatalogResponse, FetchError> {
        let token = self
            .token
            .as_deref()
            .ok_or(FetchError::NotConfigured("TREFLE_TOKEN"))?;

        let page: PlantPage = self
            .agent
            .get(self.base_url.as_str())
            .query("token", token)
            .query("page_size", PAGE_SIZE.to_string())
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(fetch_error)?
            .body_mut()
            .read_json()
            .map_err(fetch_error)?;

        let plants = page
            .data
            .ok_or_else(|| FetchError::InvalidPayload("missing `data` array".to_string()))?;
        log::info!("fetched {} plants from upstream", plants.len());
        Ok(CatalogResponse::live(plants, page.meta.unwrap_or_default()))
    }
}

// ─── Weather ─────────────────────────────────────────────────────────────

pub struct OpenWeatherClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: Option<String>,
    city: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>, city: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            base_url: WEATHER_URL.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            city: city.into(),
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(
            config.openweather_key.clone(),
            config.city.clone(),
            config.fetch_timeout(),
        )
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl WeatherSource for OpenWeatherClient {
    fn fetch_weather(&self) -> Result<WeatherReport, FetchError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::NotConfigured("OPENWEATHER_API_KEY"))?;

        self.agent
            .get(self.base_url.as_str())
            .query("q", &self.city)
            .query("appid", key)
            .query("units", "metric")
            .header("Accept", "application/json")
            .call()
            .map_err(fetch_error)?
            .body_mut()
            .read_json()
            .map_err(fetch_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::CatalogSource;

    #[test]
    fn missing_token_is_not_configured() {
        let client = TrefleClient::new(None, Duration::from_secs(1));
        assert!(matches!(
            client.fetch_plants(),
            Err(FetchError::NotConfigured(_))
        ));
        let client = TrefleClient::new(Some(String::new()), Duration::from_secs(1));
        assert!(matches!(
            client.fetch_plants(),
            Err(FetchError::NotConfigured(_))
        ));
    }

    #[test]
    fn unconfigured_sources_fall_back() {
        let plants = plants_or_fallback(&TrefleClient::new(None, Duration::from_secs(1)));
        assert_eq!(plants.source, CatalogSource::Fallback);
        assert_eq!(plants.plants.len(), 15);

        let weather =
            weather_or_demo(&OpenWeatherClient::new(None, "London", Duration::from_secs(1)));
        assert_eq!(weather, WeatherReport::demo());
    }

    #[test]
    fn unreachable_upstream_is_a_fetch_error() {
        // Port 9 on localhost: nothing listens there
        let client = TrefleClient::new(Some("t".into()), Duration::from_millis(500))
            .with_base_url("http://127.0.0.1:9/plants");
        assert!(matches!(
            client.fetch_plants(),
            Err(FetchError::Network(_) | FetchError::Timeout)
        ));
    }

    #[test]
    fn page_without_data_is_rejected() {
        let page: PlantPage = serde_json::from_str(r#"{"meta":{"total":3}}"#).unwrap();
        assert!(page.data.is_none());
        assert_eq!(page.meta.and_then(|m| m.total), Some(3));
    }
}
