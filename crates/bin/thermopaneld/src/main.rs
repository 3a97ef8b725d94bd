//! # thermopaneld — thermopanel daemon
//!
//! Composition root that wires the host adapter, application services, and
//! HTTP router together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env var overrides)
//! - Construct the host client adapter
//! - Construct application services, injecting the host via the port trait
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve, with graceful shutdown on ctrl-c
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use thermopanel_adapter_host_virtual::VirtualHost;
use thermopanel_adapter_http_axum::router;
use thermopanel_adapter_http_axum::state::AppState;
use thermopanel_app::debounce::SetpointDebouncer;
use thermopanel_app::services::config_service::ConfigService;
use thermopanel_app::services::panel_service::PanelService;
use thermopanel_app::services::status_service::StatusService;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Host adapter
    let host = if config.host.seed_demo {
        VirtualHost::with_demo_devices()
    } else {
        VirtualHost::new()
    };
    let host = Arc::new(host);

    // Services
    let debouncer = SetpointDebouncer::new(
        Arc::clone(&host),
        Duration::from_millis(config.panel.debounce_ms),
    );
    let state = AppState::new(
        StatusService::new(Arc::clone(&host)),
        PanelService::new(Arc::clone(&host), debouncer, config.panel.setpoint_step),
        ConfigService::new(Arc::clone(&host)),
        host,
    );

    // HTTP
    let app = router::build(state);
    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "thermopaneld listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => tracing::error!(error = %err, "failed to listen for shutdown signal"),
    }
}
