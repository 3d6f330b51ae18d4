//! Route listing over the content store.

use contracts::domain::a001_content::aggregate::{ContentRecord, ContentStatus};
use contracts::shared::sitemap::{RouteSource, SitemapEntry, SitemapResponse};
use std::collections::BTreeMap;

/// Static routes plus `/{type}/{slug}` for every published record.
/// Sorted by path; a content route shadowing a static one is dropped.
pub fn build_sitemap(static_routes: &[String], records: &[ContentRecord]) -> SitemapResponse {
    let mut by_path: BTreeMap<String, SitemapEntry> = BTreeMap::new();

    for route in static_routes {
        let path = normalize(route);
        by_path.entry(path.clone()).or_insert(SitemapEntry {
            path,
            source: RouteSource::Static,
            last_modified: None,
        });
    }

    for record in records
        .iter()
        .filter(|r| r.status == ContentStatus::Published)
    {
        let path = record.public_path();
        by_path.entry(path.clone()).or_insert(SitemapEntry {
            path,
            source: RouteSource::Content,
            last_modified: Some(record.metadata.updated_at.to_rfc3339()),
        });
    }

    SitemapResponse {
        entries: by_path.into_values().collect(),
    }
}

fn normalize(route: &str) -> String {
    let trimmed = route.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_content::aggregate::ContentDto;

    fn record(content_type: &str, slug: &str, status: ContentStatus) -> ContentRecord {
        ContentRecord::new_for_insert(&ContentDto {
            content_type: content_type.to_string(),
            title: slug.to_string(),
            slug: slug.to_string(),
            status: Some(status),
            ..Default::default()
        })
    }

    #[test]
    fn test_sorted_unique_published_only() {
        let statics = vec!["/".to_string(), "blog/".to_string(), "/about".to_string(), "/blog".to_string()];
        let records = vec![
            record("post", "zeta", ContentStatus::Published),
            record("post", "alpha", ContentStatus::Published),
            record("page", "hidden", ContentStatus::Draft),
        ];

        let sitemap = build_sitemap(&statics, &records);
        let paths: Vec<&str> = sitemap.entries.iter().map(|e| e.path.as_str()).collect();

        assert_eq!(paths, vec!["/", "/about", "/blog", "/post/alpha", "/post/zeta"]);
        assert_eq!(sitemap.entries[3].source, RouteSource::Content);
        assert!(sitemap.entries[3].last_modified.is_some());
        assert!(sitemap.entries[0].last_modified.is_none());
    }
}
