use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_content::aggregate::{ContentDto, ContentRecord, ContentStats};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::a001_content::{service, ContentError};
use crate::shared::data::db::get_connection;

type ApiError = (StatusCode, Json<Value>);

fn error_response(err: ContentError) -> ApiError {
    let status = match &err {
        ContentError::DuplicateSlug(_) => StatusCode::CONFLICT,
        ContentError::NotFound(_) => StatusCode::NOT_FOUND,
        ContentError::Validation(_) => StatusCode::BAD_REQUEST,
        ContentError::Storage(e) => {
            tracing::error!("Content storage failure: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() })))
}

fn parse_id(id: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Invalid id `{}`", id) })),
        )
    })
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

/// GET /api/content?type=post
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Vec<ContentRecord>>, ApiError> {
    service::list_by_type(get_connection(), query.content_type.as_deref())
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/content/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<ContentRecord>, ApiError> {
    let uuid = parse_id(&id)?;
    service::get_by_id(get_connection(), uuid)
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/content
pub async fn create(
    Json(dto): Json<ContentDto>,
) -> Result<(StatusCode, Json<ContentRecord>), ApiError> {
    service::create(get_connection(), dto)
        .await
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

/// PUT /api/content/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<ContentDto>,
) -> Result<Json<ContentRecord>, ApiError> {
    let uuid = parse_id(&id)?;
    service::update(get_connection(), uuid, dto)
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/content/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let uuid = parse_id(&id)?;
    service::delete(get_connection(), uuid)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

/// GET /api/content/stats
pub async fn stats() -> Result<Json<ContentStats>, ApiError> {
    service::stats(get_connection())
        .await
        .map(Json)
        .map_err(error_response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (ContentError::DuplicateSlug("a".into()), StatusCode::CONFLICT),
            (ContentError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ContentError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                ContentError::Storage(anyhow::anyhow!("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, Json(body)) = error_response(err);
            assert_eq!(status, expected);
            assert!(body["error"].is_string());
        }
    }
}
