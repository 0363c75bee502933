//! Backend entry point: loads configuration, prepares the store and serves the
//! REST API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_box::inbound::http::health::HealthState;
use recipe_box::inbound::http::session_config::{BuildMode, session_settings_from_env};
use recipe_box::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(io::Error::other)?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(fingerprint = %session.fingerprint(), "session key loaded");

    let mut config = ServerConfig::new(session, settings.bind_addr()?);
    if let Some(url) = settings.database_url() {
        run_pending_migrations(url)
            .await
            .map_err(io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections))
            .await
            .map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(
        host = %settings.host,
        port = settings.port,
        "listening"
    );
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
