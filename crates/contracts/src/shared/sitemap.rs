use serde::{Deserialize, Serialize};

/// Откуда взялся маршрут
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Static,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub path: String,
    pub source: RouteSource,
    /// RFC 3339, only for content routes
    #[serde(rename = "lastModified", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

/// GET /api/sitemap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapResponse {
    pub entries: Vec<SitemapEntry>,
}
