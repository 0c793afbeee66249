pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use quiz_core::{Catalog, MatchSettings, SchedulerConfig};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::sessions::SessionStore;

/// How often idle sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionStore>,
    pub scheduler: SchedulerConfig,
    pub matching: MatchSettings,
}

/// Build the router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/groups", get(routes::groups::list))
        .route("/api/sessions", post(routes::sessions::create))
        .route(
            "/api/sessions/{id}",
            get(routes::sessions::get).delete(routes::sessions::delete),
        )
        .route("/api/sessions/{id}/guess", post(routes::sessions::guess))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Loading catalog from {}...", config.items_path);
    let items_json = std::fs::read_to_string(&config.items_path)
        .with_context(|| format!("failed to read {}", config.items_path))?;
    let groups_json = std::fs::read_to_string(&config.groups_path)
        .with_context(|| format!("failed to read {}", config.groups_path))?;
    let catalog = Catalog::from_json(&items_json, &groups_json)?;
    tracing::info!(
        items = catalog.len(),
        regions = catalog.regions().len(),
        lists = catalog.lists().len(),
        "Catalog loaded"
    );

    let sessions = Arc::new(SessionStore::new(chrono::Duration::minutes(
        config.session_idle_minutes,
    )));
    spawn_sweeper(sessions.clone());

    let state = AppState {
        catalog: Arc::new(catalog),
        sessions,
        scheduler: config.scheduler,
        matching: config.matching,
    };

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn spawn_sweeper(sessions: Arc<SessionStore>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let dropped = sessions.sweep(chrono::Utc::now());
            if dropped > 0 {
                tracing::info!(dropped, remaining = sessions.len(), "Swept idle sessions");
            }
        }
    });
}

async fn health_check() -> &'static str {
    "OK"
}
