//! Depot entry-point: loads settings, migrates the database and serves the
//! REST API.

mod server;

use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use depot::inbound::http::health::HealthState;
use depot::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use depot::outbound::storage::FsImageStore;
use depot::settings::DepotSettings;
use ortho_config::OrthoConfig as _;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DepotSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let database_url = settings.database_url().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let applied = run_migrations(database_url, settings.migration_retry())
        .await
        .map_err(io::Error::other)?;
    info!(applied, "database schema is up to date");

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(io::Error::other)?;

    let upload_dir = settings.upload_dir();
    let image_store = FsImageStore::open(&upload_dir).map_err(io::Error::other)?;
    info!(upload_dir = %upload_dir, "upload store ready");

    let config = ServerConfig::new(bind_addr, pool, image_store)
        .with_cors_origins(settings.cors_origins())
        .with_max_upload_bytes(settings.max_upload_bytes());
    info!(bind_addr = %config.bind_addr(), "starting http server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
