pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::insight;
use crate::records;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Record lifecycle
        .route(
            "/api/v1/records/ingest",
            post(records::handlers::handle_ingest),
        )
        .route("/api/v1/records", get(records::handlers::handle_list_records))
        .route(
            "/api/v1/records/:id",
            get(records::handlers::handle_get_record),
        )
        .route(
            "/api/v1/records/:id/illustration",
            patch(records::handlers::handle_attach_illustration),
        )
        // Insight API
        .route(
            "/api/v1/insights/report",
            get(insight::handlers::handle_monthly_report),
        )
        .route(
            "/api/v1/insights/emotion-flow",
            get(insight::handlers::handle_emotion_flow),
        )
        .route(
            "/api/v1/insights/recommendations",
            get(insight::handlers::handle_recommendations),
        )
        .with_state(state)
}
