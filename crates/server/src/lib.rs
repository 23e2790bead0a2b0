pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

use crate::{
    config::{get_config, AppConfig},
    router::create_router,
    state::build_app_state,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Configures and runs the web server.
///
/// The knowledge cache is warmed before the listener starts accepting
/// requests.
pub async fn run(listener: TcpListener, config: AppConfig) -> anyhow::Result<()> {
    let app_state = build_app_state(config)?;
    app_state.generation.knowledge().warm().await;
    let app = create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn log_banner(config: &AppConfig, addr: SocketAddr) {
    info!(
        address = %addr,
        public = config.public,
        model = %config.openai_model,
        api_key = config.openai_api_key.is_some(),
        password = config.site_password.is_some(),
        "🚀 CJM Builder starting"
    );
    if config.openai_api_key.is_none() {
        warn!("🔑 OPENAI_API_KEY is not set (check your .env file)");
    }
    if config.public && config.site_password.is_none() {
        warn!("🔐 Public mode without SITE_PASSWORD: anyone can generate");
    }
}

/// The library's main entry point.
///
/// Sets up logging, configuration, and the TCP listener, then calls `run`.
pub async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = get_config(None)?;
    let addr = config.bind_address();
    log_banner(&config, addr);
    let listener = TcpListener::bind(addr).await?;

    run(listener, config).await
}
