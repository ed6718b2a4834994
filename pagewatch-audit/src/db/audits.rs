//! Audit persistence

use crate::db::pages::parse_timestamp;
use crate::models::{AccessibilityScore, Audit, AuditStatus};
use pagewatch_common::Result;
use sqlx::{Row, SqlitePool};

/// Save a new audit, assigning its id
pub async fn save_audit(pool: &SqlitePool, audit: &mut Audit) -> Result<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO audits (page_id, score, status, audit_date, raw_response, error_message, retry_count, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(audit.page_id)
    .bind(audit.score.value())
    .bind(audit.status.as_str())
    .bind(audit.audit_date.to_rfc3339())
    .bind(&audit.raw_response)
    .bind(&audit.error_message)
    .bind(audit.retry_count)
    .bind(audit.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    audit.id = Some(result.last_insert_rowid());
    Ok(())
}

/// Update a finalized audit's mutable columns
///
/// `audit_date` and `created_at` are set once at creation and never
/// touched again.
pub async fn update_audit(pool: &SqlitePool, audit: &Audit) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE audits
        SET score = ?, status = ?, raw_response = ?, error_message = ?, retry_count = ?
        WHERE id = ?
        "#,
    )
    .bind(audit.score.value())
    .bind(audit.status.as_str())
    .bind(&audit.raw_response)
    .bind(&audit.error_message)
    .bind(audit.retry_count)
    .bind(audit.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load one audit by id
pub async fn find_audit(pool: &SqlitePool, id: i64) -> Result<Option<Audit>> {
    let row = sqlx::query("SELECT * FROM audits WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(|r| hydrate_audit(&r)).transpose()
}

/// Load a page's audit history, newest first
pub async fn find_audits_by_page(pool: &SqlitePool, page_id: i64) -> Result<Vec<Audit>> {
    let rows = sqlx::query("SELECT * FROM audits WHERE page_id = ? ORDER BY audit_date DESC, id DESC")
        .bind(page_id)
        .fetch_all(pool)
        .await?;

    rows.iter().map(hydrate_audit).collect()
}

/// Load a page's most recent audit, if any
pub async fn find_latest_by_page(pool: &SqlitePool, page_id: i64) -> Result<Option<Audit>> {
    let row = sqlx::query(
        "SELECT * FROM audits WHERE page_id = ? ORDER BY audit_date DESC, id DESC LIMIT 1",
    )
    .bind(page_id)
    .fetch_optional(pool)
    .await?;

    row.map(|r| hydrate_audit(&r)).transpose()
}

/// Load a page's most recent completed audit, excluding one audit id
///
/// Used by the orchestrator to find the comparison baseline for a
/// freshly completed audit.
pub async fn find_latest_completed_excluding(
    pool: &SqlitePool,
    page_id: i64,
    exclude_audit_id: i64,
) -> Result<Option<Audit>> {
    let row = sqlx::query(
        r#"
        SELECT * FROM audits
        WHERE page_id = ? AND status = 'completed' AND id != ?
        ORDER BY audit_date DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(page_id)
    .bind(exclude_audit_id)
    .fetch_optional(pool)
    .await?;

    row.map(|r| hydrate_audit(&r)).transpose()
}

fn hydrate_audit(row: &sqlx::sqlite::SqliteRow) -> Result<Audit> {
    let status: String = row.get("status");
    let audit_date: String = row.get("audit_date");
    let created_at: String = row.get("created_at");

    Ok(Audit {
        id: Some(row.get("id")),
        page_id: row.get("page_id"),
        score: AccessibilityScore::new(row.get("score"))?,
        status: status.parse::<AuditStatus>()?,
        audit_date: parse_timestamp(&audit_date)?,
        raw_response: row.get("raw_response"),
        error_message: row.get("error_message"),
        retry_count: row.get("retry_count"),
        created_at: parse_timestamp(&created_at)?,
    })
}
