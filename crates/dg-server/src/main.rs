//! `dreamgarden`: proxy server plus export, catalog and tip commands.

use anyhow::Context;
use clap::Parser;
use dg_core::catalog::search;
use dg_core::{FileStore, WeatherReport, load_layout, plant_glyph, weather_tip};
use dg_render::{export_layout, write_artifact};
use dg_server::{
    AppState, Cli, Command, ExportArgs, OpenWeatherClient, ServerConfig, TrefleClient,
    UpstreamConfig, create_router, plants_or_fallback, weather_or_demo,
};
use std::net::SocketAddr;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(config) => serve(config).await,
        Command::Export(args) => export(&cli.store, &args),
        Command::Catalog { search, upstream } => {
            tokio::task::spawn_blocking(move || catalog(search.as_deref(), &upstream)).await?
        }
        Command::Tip {
            temp,
            humidity,
            upstream,
        } => tokio::task::spawn_blocking(move || tip(temp, humidity, &upstream)).await?,
    }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if config.upstream.trefle_token.is_none() {
        log::warn!("TREFLE_TOKEN not set; /api/plants will serve fallback plants");
    }
    if config.upstream.openweather_key.is_none() {
        log::info!("OPENWEATHER_API_KEY not set; /api/weather will serve demo weather");
    }

    let app = create_router(AppState::from_config(&config.upstream));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn export(store: &Path, args: &ExportArgs) -> anyhow::Result<()> {
    let store = FileStore::new(store);
    log::info!("loading garden from {}", store.path().display());
    let layout = load_layout(&store);
    let now = chrono::Local::now();
    let date_label = now.format("%-m/%-d/%Y").to_string();

    let artifact = export_layout(
        &layout,
        args.canvas(),
        args.format,
        &date_label,
        now.timestamp_millis().max(0) as u64,
    )
    .context("Error exporting garden")?;
    let path = write_artifact(&args.out_dir, &artifact).context("Error exporting garden")?;

    println!("{}", path.display());
    Ok(())
}

fn catalog(term: Option<&str>, upstream: &UpstreamConfig) -> anyhow::Result<()> {
    let response = plants_or_fallback(&TrefleClient::from_config(upstream));
    let shown = match term {
        Some(term) => search(&response.plants, term),
        None => response.plants.iter().collect(),
    };

    for plant in shown {
        println!(
            "{} {:<24} {}",
            plant_glyph(&plant.common_name),
            plant.display_name(),
            plant.scientific_name
        );
    }
    if response.is_fallback() {
        eprintln!("(offline catalog)");
    }
    Ok(())
}

fn tip(temp: Option<f64>, humidity: Option<f64>, upstream: &UpstreamConfig) -> anyhow::Result<()> {
    let report = if temp.is_some() || humidity.is_some() {
        let mut report = WeatherReport::default();
        report.main.temp = temp;
        report.main.humidity = humidity;
        report
    } else {
        weather_or_demo(&OpenWeatherClient::from_config(upstream))
    };

    if !report.name.is_empty() {
        match report.condition() {
            Some(condition) => println!("{} ({condition})", report.headline()),
            None => println!("{}", report.headline()),
        }
    }
    println!("{}", weather_tip(Some(&report)));
    Ok(())
}
