//! Database initialization
//!
//! Opens (or creates) the SQLite database and creates the schema
//! idempotently. Safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers while the scheduler pass writes
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Initialize an in-memory database for tests
///
/// Single connection: every pooled connection to `:memory:` would
/// otherwise see its own empty database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_pages_table(pool).await?;
    create_audits_table(pool).await?;
    create_issues_table(pool).await?;
    create_audit_comparisons_table(pool).await?;
    Ok(())
}

async fn create_pages_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER,
            url TEXT NOT NULL UNIQUE,
            name TEXT,
            cadence TEXT NOT NULL DEFAULT 'weekly',
            enabled INTEGER NOT NULL DEFAULT 1,
            last_audited_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_audits_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS audits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_id INTEGER NOT NULL REFERENCES pages(id),
            score INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL,
            audit_date TEXT NOT NULL,
            raw_response TEXT,
            error_message TEXT,
            retry_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // History reads are always newest-first per page
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_audits_page_date ON audits(page_id, audit_date DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_issues_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS issues (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            audit_id INTEGER NOT NULL REFERENCES audits(id),
            severity TEXT NOT NULL,
            category TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            element_selector TEXT,
            help_url TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_issues_audit ON issues(audit_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_audit_comparisons_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS audit_comparisons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            current_audit_id INTEGER NOT NULL REFERENCES audits(id),
            previous_audit_id INTEGER NOT NULL REFERENCES audits(id),
            score_delta INTEGER NOT NULL,
            new_issues_count INTEGER NOT NULL,
            resolved_issues_count INTEGER NOT NULL,
            persistent_issues_count INTEGER NOT NULL,
            trend TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_database_schema() {
        let pool = init_memory_database().await.unwrap();

        // Schema creation is idempotent
        create_schema(&pool).await.unwrap();

        for table in ["pages", "audits", "issues", "audit_comparisons"] {
            let count: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&pool)
            .await
            .unwrap();
            assert_eq!(count, 1, "missing table {table}");
        }
    }

    #[tokio::test]
    async fn test_init_database_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("pagewatch.sqlite");

        let pool = init_database(&db_path).await.unwrap();
        drop(pool);

        assert!(db_path.exists());
    }
}
