use axum::{extract::Query, http::StatusCode, Json};
use contracts::shared::visual_editor::{ApplyPatchRequest, ApplyPatchResponse, EditorSettings};
use serde::{Deserialize, Serialize};

use crate::shared::config::get_config;
use crate::shared::data::db::get_connection;
use crate::system::component_patch::service::{self, PatchJournalError};

/// POST /api/visual-editor/apply-patch
pub async fn apply_patch(
    Json(request): Json<ApplyPatchRequest>,
) -> (StatusCode, Json<ApplyPatchResponse>) {
    match service::record(get_connection(), &request).await {
        Ok(applied) => (
            StatusCode::OK,
            Json(ApplyPatchResponse {
                success: true,
                message: None,
                applied,
            }),
        ),
        Err(PatchJournalError::Invalid(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ApplyPatchResponse {
                success: false,
                message: Some(message),
                applied: 0,
            }),
        ),
        Err(PatchJournalError::Storage(e)) => {
            tracing::error!("Failed to journal patch: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApplyPatchResponse {
                    success: false,
                    message: Some("Failed to store patch".to_string()),
                    applied: 0,
                }),
            )
        }
    }
}

/// GET /api/visual-editor/settings
pub async fn settings() -> Json<EditorSettings> {
    Json(get_config().editor.clone())
}

#[derive(Debug, Deserialize)]
pub struct PatchListQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournaledPatch {
    pub batch_id: String,
    pub source_file: String,
    pub attribute: String,
    pub value: String,
    pub old_value: String,
    pub created_at: String,
}

/// GET /api/visual-editor/patches?limit=50
pub async fn list_patches(
    Query(query): Query<PatchListQuery>,
) -> Result<Json<Vec<JournaledPatch>>, StatusCode> {
    let limit = query.limit.unwrap_or(50).min(500);
    match service::list_recent(get_connection(), limit).await {
        Ok(rows) => Ok(Json(
            rows.into_iter()
                .map(|r| JournaledPatch {
                    batch_id: r.batch_id,
                    source_file: r.source_file,
                    attribute: r.attribute,
                    value: r.value,
                    old_value: r.old_value,
                    created_at: r.created_at.to_rfc3339(),
                })
                .collect(),
        )),
        Err(e) => {
            tracing::error!("Failed to list patches: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
