//! Festival service - a REST catalog of festivals and their artist lineups
//!
//! The catalog lives in memory. It is seeded once at startup from a JSON
//! snapshot and then served over HTTP.

mod api;
mod config;
mod models;
mod stores;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::config::{Paths, Settings};
use crate::stores::FestivalStore;

/// Festival service - REST catalog of festivals and artists
#[derive(Parser, Debug)]
#[command(name = "festival-service")]
#[command(version)]
#[command(about = "REST catalog of festivals and their artist lineups")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed snapshot to load instead of the one named in settings.json
    #[arg(long, env = "FESTIVAL_SEED_FILE")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --debug when set
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Festival service v{} starting...", env!("CARGO_PKG_VERSION"));

    let paths = Paths::new(args.config)?;
    info!("Config directory: {:?}", paths.config_dir());
    let settings = Settings::load(&paths)?;

    // init phase: seed the store before any request can reach it
    let store = FestivalStore::new();
    let seed_path = settings.seed_path(&paths, args.seed);
    info!("Loading catalog from {:?}...", seed_path);
    store
        .load_snapshot(&seed_path)
        .context("Failed to load seed snapshot")?;
    info!(
        "Catalog ready: {} festivals, {} artists",
        store.festival_count(),
        store.artist_count()
    );

    serve(args.host, args.port, settings, web::Data::new(store)).await
}

async fn serve(
    host: String,
    port: u16,
    settings: Settings,
    store: web::Data<FestivalStore>,
) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    info!("Server listening on http://{}", addr);

    let origins = settings.allowed_origins.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(cors(&origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(api::configure)
    });
    if settings.workers > 0 {
        server = server.workers(settings.workers);
    }

    server.bind(addr)?.run().await?;

    Ok(())
}

fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if origins.is_empty() {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
