//! Page persistence
//!
//! The engine owns only `last_audited_at`; everything else on a page
//! belongs to the management layer.

use crate::models::{Cadence, Page};
use chrono::{DateTime, Utc};
use pagewatch_common::Result;
use sqlx::{Row, SqlitePool};

/// Save a new page, assigning its id
pub async fn save_page(pool: &SqlitePool, page: &mut Page) -> Result<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO pages (project_id, url, name, cadence, enabled, last_audited_at, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(page.project_id)
    .bind(&page.url)
    .bind(&page.name)
    .bind(page.cadence.as_str())
    .bind(page.enabled)
    .bind(page.last_audited_at.map(|t| t.to_rfc3339()))
    .bind(page.created_at.to_rfc3339())
    .bind(page.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    page.id = Some(result.last_insert_rowid());
    Ok(())
}

/// Load a page by id
pub async fn find_page(pool: &SqlitePool, id: i64) -> Result<Option<Page>> {
    let row = sqlx::query("SELECT * FROM pages WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(|r| hydrate_page(&r)).transpose()
}

/// Load all enabled pages
pub async fn find_enabled_pages(pool: &SqlitePool) -> Result<Vec<Page>> {
    let rows = sqlx::query("SELECT * FROM pages WHERE enabled = 1 ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.iter().map(hydrate_page).collect()
}

/// Record a successful audit time on the page
pub async fn update_page_audit_time(
    pool: &SqlitePool,
    page_id: i64,
    at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query("UPDATE pages SET last_audited_at = ?, updated_at = ? WHERE id = ?")
        .bind(at.to_rfc3339())
        .bind(at.to_rfc3339())
        .bind(page_id)
        .execute(pool)
        .await?;

    Ok(())
}

fn hydrate_page(row: &sqlx::sqlite::SqliteRow) -> Result<Page> {
    let cadence: String = row.get("cadence");
    let last_audited_at: Option<String> = row.get("last_audited_at");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Page {
        id: Some(row.get("id")),
        project_id: row.get("project_id"),
        url: row.get("url"),
        name: row.get("name"),
        cadence: cadence.parse::<Cadence>()?,
        enabled: row.get("enabled"),
        last_audited_at: last_audited_at.as_deref().map(parse_timestamp).transpose()?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Parse an RFC 3339 timestamp stored as TEXT
pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| pagewatch_common::Error::Internal(format!("Bad timestamp '{s}': {e}")))
}
