//! Client for `/api/content` and `/api/sitemap`

use crate::shared::api_utils::{api_url, error_message};
use contracts::domain::a001_content::aggregate::{ContentDto, ContentRecord, ContentStats};
use contracts::shared::sitemap::SitemapResponse;
use gloo_net::http::Request;

/// Список записей; `None`: все типы
pub async fn list(content_type: Option<&str>) -> Result<Vec<ContentRecord>, String> {
    let url = match content_type {
        Some(t) => api_url(&format!("/api/content?type={}", urlencoding::encode(t))),
        None => api_url("/api/content"),
    };
    let response = Request::get(&url).send().await.map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(error_message(&response).await);
    }
    response.json().await.map_err(|e| e.to_string())
}

pub async fn fetch_by_id(id: &str) -> Result<ContentRecord, String> {
    let url = api_url(&format!("/api/content/{}", id));
    let response = Request::get(&url).send().await.map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(error_message(&response).await);
    }
    response.json().await.map_err(|e| e.to_string())
}

/// Создать (без id) или обновить (с id) запись
pub async fn save(dto: &ContentDto) -> Result<ContentRecord, String> {
    let request = match &dto.id {
        Some(id) => Request::put(&api_url(&format!("/api/content/{}", id))),
        None => Request::post(&api_url("/api/content")),
    };
    let response = request
        .json(dto)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(error_message(&response).await);
    }
    response.json().await.map_err(|e| e.to_string())
}

pub async fn delete(id: &str) -> Result<(), String> {
    let url = api_url(&format!("/api/content/{}", id));
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(error_message(&response).await);
    }
    Ok(())
}

pub async fn stats() -> Result<ContentStats, String> {
    Request::get(&api_url("/api/content/stats"))
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json()
        .await
        .map_err(|e| e.to_string())
}

pub async fn sitemap() -> Result<SitemapResponse, String> {
    Request::get(&api_url("/api/sitemap"))
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json()
        .await
        .map_err(|e| e.to_string())
}
