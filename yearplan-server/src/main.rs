mod config;
mod routes;
mod singleton;
mod state;
mod storage;

use anyhow::Result;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use yearplan_core::Year;

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::storage::HashStore;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = ServerConfig::parse();
    let year = Year::new(config.year)?;

    // Ensure only one server writes this data directory
    let _lock = singleton::acquire_lock(&config.data_path())?;

    let store = HashStore::open(&config.store_file(), &config.store_key())?;
    let state = AppState::new(store, config.secret());

    let key = state.store.key().to_string();

    if state.secret.is_none() {
        warn!("APP_PASSWORD is not set, accepting unauthenticated requests");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        addr = %config.bind,
        year = year.value(),
        key = %key,
        file = %config.store_file().display(),
        "yearplan-server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
