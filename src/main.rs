mod api;
mod config;
mod error;
mod map;
mod models;
mod services;
mod session;
mod utils;
mod web;

use anyhow::{anyhow, Result};
use api::HttpApiProvider;
use config::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web::AppState;

fn setup_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| anyhow!("tracing init failed: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing()?;

    let config = Config::from_env()?;
    let provider = HttpApiProvider::new(&config)?;

    let state = AppState::new(provider);
    web::start_server(&config, state).await
}
