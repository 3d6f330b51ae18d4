use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Minimal schema bootstrap, safe to run on every start
const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS a001_content (
        id TEXT PRIMARY KEY NOT NULL,
        content_type TEXT NOT NULL,
        title TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        body TEXT NOT NULL DEFAULT '',
        excerpt TEXT,
        category_id TEXT,
        status TEXT NOT NULL DEFAULT 'draft',
        seo_title TEXT,
        seo_description TEXT,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_a001_content_type ON a001_content (content_type);",
    r#"
    CREATE TABLE IF NOT EXISTS sys_component_patch (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        batch_id TEXT NOT NULL,
        source_file TEXT NOT NULL,
        attribute TEXT NOT NULL,
        value TEXT NOT NULL,
        old_value TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
    "#,
    "CREATE INDEX IF NOT EXISTS idx_sys_component_patch_batch ON sys_component_patch (batch_id);",
];

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;
    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Ensure required tables exist
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for sql in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Fresh in-memory database with the schema applied (one per test)
#[cfg(test)]
pub async fn connect_in_memory() -> DatabaseConnection {
    let mut options = sea_orm::ConnectOptions::new("sqlite::memory:".to_string());
    // A single connection keeps every query on the same in-memory database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options)
        .await
        .expect("in-memory sqlite");
    bootstrap_schema(&conn).await.expect("schema bootstrap");
    conn
}
