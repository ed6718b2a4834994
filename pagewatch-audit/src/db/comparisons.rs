//! Audit comparison persistence

use crate::db::pages::parse_timestamp;
use crate::models::{AuditComparison, Trend};
use pagewatch_common::Result;
use sqlx::{Row, SqlitePool};

/// Save a comparison, assigning its id
pub async fn save_comparison(pool: &SqlitePool, comparison: &mut AuditComparison) -> Result<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO audit_comparisons
            (current_audit_id, previous_audit_id, score_delta,
             new_issues_count, resolved_issues_count, persistent_issues_count,
             trend, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(comparison.current_audit_id)
    .bind(comparison.previous_audit_id)
    .bind(comparison.score_delta)
    .bind(comparison.new_issues_count)
    .bind(comparison.resolved_issues_count)
    .bind(comparison.persistent_issues_count)
    .bind(comparison.trend.as_str())
    .bind(comparison.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    comparison.id = Some(result.last_insert_rowid());
    Ok(())
}

/// Load the comparison whose current side is the given audit
pub async fn find_comparison_by_current_audit(
    pool: &SqlitePool,
    current_audit_id: i64,
) -> Result<Option<AuditComparison>> {
    let row = sqlx::query("SELECT * FROM audit_comparisons WHERE current_audit_id = ?")
        .bind(current_audit_id)
        .fetch_optional(pool)
        .await?;

    row.map(|r| hydrate_comparison(&r)).transpose()
}

fn hydrate_comparison(row: &sqlx::sqlite::SqliteRow) -> Result<AuditComparison> {
    let trend: String = row.get("trend");
    let created_at: String = row.get("created_at");

    Ok(AuditComparison {
        id: Some(row.get("id")),
        current_audit_id: row.get("current_audit_id"),
        previous_audit_id: row.get("previous_audit_id"),
        score_delta: row.get("score_delta"),
        new_issues_count: row.get("new_issues_count"),
        resolved_issues_count: row.get("resolved_issues_count"),
        persistent_issues_count: row.get("persistent_issues_count"),
        trend: trend.parse::<Trend>()?,
        created_at: parse_timestamp(&created_at)?,
    })
}
