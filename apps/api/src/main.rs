mod category_client;
mod config;
mod db;
mod errors;
mod insight;
mod models;
mod records;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::category_client::CategoryClient;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::pg::PgRecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter_directive(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Insight API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;
    let store = Arc::new(PgRecordStore::new(pool));

    // Initialize category client
    let category = CategoryClient::new(config.category_service_url.clone());
    if category.is_enabled() {
        info!("Category service client initialized");
    } else {
        info!("Category service not configured; using local keyword fallback");
    }

    let state = AppState { store, category };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Default log filter scoped to this crate. Tracing targets use the
/// underscored module path, not the hyphenated crate name.
fn default_filter_directive(level: &str) -> String {
    format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), level)
}
