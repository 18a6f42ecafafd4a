use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::record::Record;
use crate::records::ingest::{build_record, IngestRequest};
use crate::state::AppState;

/// POST /api/v1/records/ingest
pub async fn handle_ingest(
    State(state): State<AppState>,
    Json(req): Json<IngestRequest>,
) -> Result<Json<Record>, AppError> {
    if req.messages.is_empty() {
        return Err(AppError::Validation(
            "messages must not be empty".to_string(),
        ));
    }

    let record = build_record(&req, &state.category, Utc::now()).await;
    state.store.save(&record).await?;

    info!(
        "ingested record {} ({} tags, {} emotions)",
        record.id,
        record.tags.len(),
        record.emotions.len()
    );
    Ok(Json(record))
}

/// GET /api/v1/records
pub async fn handle_list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, AppError> {
    Ok(Json(state.store.get_all().await?))
}

/// GET /api/v1/records/:id
pub async fn handle_get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, AppError> {
    state
        .store
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Record {id} not found")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IllustrationRequest {
    pub image_url: String,
}

/// PATCH /api/v1/records/:id/illustration
///
/// The one permitted post-creation mutation: attaching a generated
/// illustration to an existing record.
pub async fn handle_attach_illustration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<IllustrationRequest>,
) -> Result<StatusCode, AppError> {
    if state.store.attach_illustration(&id, &req.image_url).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Record {id} not found")))
    }
}
