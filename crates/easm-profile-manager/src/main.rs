mod actions;
mod aggregate;
mod api;
mod auth;
mod config;
mod errors;
mod gateway;
mod identity;
mod jobs;
mod models;
mod profiles;
mod table;
mod ui;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::{mpsc, watch};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    api::{connect, delete_profiles, disconnect, health, list_profiles, refresh},
    config::AppConfig,
    gateway::{build_http_client, GatewayClient},
    jobs::{refresh_loop, Dashboard, RefreshHandle},
    models::Snapshot,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http: reqwest::Client,
    pub gateway_for: fn(reqwest::Client, &str) -> GatewayClient,
    pub dashboard: Dashboard,
    pub refresh: RefreshHandle,
    pub snapshots: watch::Receiver<Snapshot>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Arc::new(AppConfig::load()?);
    let http = build_http_client(config.request_timeout_secs)?;

    let dashboard = Dashboard::default();
    let (tx, rx) = mpsc::channel(16);
    let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());

    tokio::spawn(refresh_loop(
        dashboard.clone(),
        rx,
        snapshot_tx,
        config.refresh_interval(),
        config.max_concurrent_requests,
    ));

    let state = AppState {
        config: config.clone(),
        http,
        gateway_for: GatewayClient::for_host,
        dashboard,
        refresh: RefreshHandle::new(tx),
        snapshots: snapshot_rx,
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid host/port")?;

    info!(
        %addr,
        refresh_interval_secs = config.refresh_interval_secs,
        "EASM Profile Manager listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/connect", post(connect))
        .route("/api/disconnect", post(disconnect))
        .route("/api/profiles", get(list_profiles))
        .route("/api/profiles/delete", post(delete_profiles))
        .route("/api/refresh", post(refresh))
        .route("/", get(ui::index))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();
}
