use serde::{Deserialize, Serialize};

/// Limits and addresses for one editor session.
///
/// Served by the backend from the `[editor]` section of `config.toml`; every
/// field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Address of the page shown in the preview surface.
    pub preview_url: String,
    pub save_timeout_ms: u64,
    /// Hard cap on elements considered per scan.
    pub max_candidates: usize,
    /// Hard cap on registry entries per generation.
    pub max_entries: usize,
    pub history_depth: usize,
    /// Minimum rendered width and height (px) for structural matches.
    pub min_visible_size: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            preview_url: "http://127.0.0.1:8080/".to_string(),
            save_timeout_ms: 10_000,
            max_candidates: 2_000,
            max_entries: 300,
            history_depth: 50,
            min_visible_size: 4.0,
        }
    }
}
