//! Command-line and environment configuration for the `dreamgarden` binary.

use clap::{Args, Parser, Subcommand};
use dg_core::CanvasSize;
use dg_render::ExportFormat;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORE: &str = "dreamgarden-storage.json";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CITY: &str = "London";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

#[derive(Parser, Debug)]
#[command(
    name = "dreamgarden",
    version,
    about = "Garden planner: proxy server, export and catalog tools"
)]
pub struct Cli {
    /// File holding the saved garden (a JSON key-value map).
    #[arg(long, global = true, env = "DREAMGARDEN_STORE", default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the catalog and weather proxy.
    Serve(ServerConfig),
    /// Export the saved garden as an image or document.
    Export(ExportArgs),
    /// Print the plant catalog.
    Catalog {
        /// Only show plants whose name contains this term.
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        upstream: UpstreamConfig,
    },
    /// Print today's gardening tip.
    Tip {
        /// Temperature in °C; skips the weather lookup.
        #[arg(long)]
        temp: Option<f64>,
        /// Relative humidity in percent; skips the weather lookup.
        #[arg(long)]
        humidity: Option<f64>,
        #[command(flatten)]
        upstream: UpstreamConfig,
    },
}

/// Credentials and limits for the upstream plant and weather APIs.
#[derive(Args, Debug, Clone, Default)]
pub struct UpstreamConfig {
    #[arg(long, env = "TREFLE_TOKEN", hide_env_values = true)]
    pub trefle_token: Option<String>,

    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub openweather_key: Option<String>,

    #[arg(long, env = "WEATHER_CITY", default_value = DEFAULT_CITY)]
    pub city: String,

    /// Upper bound on each upstream request.
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[command(flatten)]
    pub upstream: UpstreamConfig,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// `png` or `pdf`.
    #[arg(long, default_value = "png")]
    pub format: ExportFormat,

    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Width of the canvas the garden was designed on.
    #[arg(long, default_value_t = CanvasSize::default().width)]
    pub canvas_width: f64,

    /// Height of the canvas the garden was designed on.
    #[arg(long, default_value_t = CanvasSize::default().height)]
    pub canvas_height: f64,
}

impl ExportArgs {
    pub fn canvas(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }
}
