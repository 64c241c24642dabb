//! DreamGarden proxy server and command-line tools.
//!
//! The server fronts the plant catalog and weather APIs so browser code
//! never holds upstream credentials, and answers with fixed fallback data
//! whenever an upstream is unavailable.

pub mod config;
pub mod routes;
pub mod upstream;

pub use config::{Cli, Command, ExportArgs, ServerConfig, UpstreamConfig};
pub use routes::{AppState, create_router};
pub use upstream::{
    OpenWeatherClient, PlantSource, TrefleClient, WeatherSource, plants_or_fallback,
    weather_or_demo,
};
