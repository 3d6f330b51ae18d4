use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // VISUAL EDITOR
        // ========================================
        .route(
            "/api/visual-editor/apply-patch",
            post(handlers::visual_editor::apply_patch),
        )
        .route(
            "/api/visual-editor/settings",
            get(handlers::visual_editor::settings),
        )
        .route(
            "/api/visual-editor/patches",
            get(handlers::visual_editor::list_patches),
        )
        // ========================================
        // CONTENT
        // ========================================
        .route(
            "/api/content",
            get(handlers::a001_content::list).post(handlers::a001_content::create),
        )
        .route("/api/content/stats", get(handlers::a001_content::stats))
        .route(
            "/api/content/:id",
            get(handlers::a001_content::get_by_id)
                .put(handlers::a001_content::update)
                .delete(handlers::a001_content::delete),
        )
        .route("/api/sitemap", get(handlers::sitemap::sitemap))
}
