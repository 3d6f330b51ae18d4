use crate::shared::api_utils::api_url;
use async_trait::async_trait;
use contracts::shared::visual_editor::{
    ApplyPatchRequest, ApplyPatchResponse, ChangeSet, DispatchError, EditorSettings, PatchApplier,
};
use gloo_net::http::Request;

/// Sends change-sets to `POST /api/visual-editor/apply-patch`.
#[derive(Debug, Clone, Default)]
pub struct BackendPatchApplier;

#[async_trait(?Send)]
impl PatchApplier for BackendPatchApplier {
    async fn apply(&self, request: &ApplyPatchRequest) -> Result<(), DispatchError> {
        let url = api_url("/api/visual-editor/apply-patch");
        let response = Request::post(&url)
            .json(request)
            .map_err(|e| DispatchError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Option<ApplyPatchResponse> = response.json().await.ok();
        match body {
            Some(body) if body.success => Ok(()),
            Some(body) => Err(DispatchError::Rejected(
                body.message.unwrap_or_else(|| format!("HTTP {}", status)),
            )),
            None if response.ok() => Err(DispatchError::Transport(
                "Malformed apply-patch response".to_string(),
            )),
            None => Err(DispatchError::Rejected(format!("HTTP {}", status))),
        }
    }
}

/// Загрузить настройки редактора
pub async fn fetch_settings() -> Result<EditorSettings, String> {
    Request::get(&api_url("/api/visual-editor/settings"))
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json()
        .await
        .map_err(|e| e.to_string())
}

/// Send an undo/redo step, already applied in the preview, to the backend.
pub async fn forward_history_step(change_set: &ChangeSet) -> Result<(), String> {
    BackendPatchApplier
        .apply(&change_set.to_request())
        .await
        .map_err(|e| e.to_string())
}
