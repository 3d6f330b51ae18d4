use contracts::shared::visual_editor::EditorSettings;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory with the built frontend, served as fallback
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: "dist".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SitemapConfig {
    /// Routes that exist independently of the content store
    pub static_routes: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            static_routes: vec!["/".to_string(), "/blog".to_string(), "/about".to_string()],
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
port = 3000
static_dir = "dist"

[editor]
preview_url = "http://127.0.0.1:8080/"
save_timeout_ms = 10000
history_depth = 50
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Store the loaded configuration for handlers
pub fn init_config(config: Config) -> anyhow::Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Config already initialized"))
}

pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config has not been initialized")
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    // If absolute path, use as is
    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    // If relative path, resolve it relative to the executable directory
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(db_path);
            return Ok(resolved_path);
        }
    }

    // Fallback: use relative to current directory
    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.editor.save_timeout_ms, 10_000);
        assert_eq!(config.editor.max_entries, 300);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str(
            r#"
            [database]
            path = "/var/lib/site/app.db"

            [editor]
            history_depth = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.server.static_dir, "dist");
        assert_eq!(config.editor.history_depth, 20);
        assert_eq!(config.editor.save_timeout_ms, 10_000);
        assert_eq!(config.sitemap.static_routes.len(), 3);
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/var/lib/site/app.db")
        );
    }
}
