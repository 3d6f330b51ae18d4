use axum::{http::StatusCode, Json};
use contracts::shared::sitemap::SitemapResponse;

use crate::domain::a001_content::service;
use crate::shared::config::get_config;
use crate::shared::data::db::get_connection;
use crate::shared::sitemap::build_sitemap;

/// GET /api/sitemap
pub async fn sitemap() -> Result<Json<SitemapResponse>, StatusCode> {
    match service::list_published(get_connection()).await {
        Ok(records) => Ok(Json(build_sitemap(
            &get_config().sitemap.static_routes,
            &records,
        ))),
        Err(e) => {
            tracing::error!("Failed to build sitemap: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
