//! Issue persistence
//!
//! Issues for one audit are written as a single atomic batch: either
//! every row lands or none do.

use crate::db::pages::parse_timestamp;
use crate::models::{Issue, IssueCategory, IssueSeverity};
use pagewatch_common::Result;
use sqlx::{Row, SqlitePool};

/// Save an issue batch inside one transaction, assigning ids
pub async fn save_issues(pool: &SqlitePool, issues: &mut [Issue]) -> Result<()> {
    if issues.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    for issue in issues.iter_mut() {
        let result = sqlx::query(
            r#"
            INSERT INTO issues (audit_id, severity, category, title, description, element_selector, help_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(issue.audit_id)
        .bind(issue.severity.as_str())
        .bind(issue.category.as_str())
        .bind(&issue.title)
        .bind(&issue.description)
        .bind(&issue.element_selector)
        .bind(&issue.help_url)
        .bind(issue.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        issue.id = Some(result.last_insert_rowid());
    }

    tx.commit().await?;
    Ok(())
}

/// Load an audit's issues, heaviest severity first
pub async fn find_issues_by_audit(pool: &SqlitePool, audit_id: i64) -> Result<Vec<Issue>> {
    let rows = sqlx::query(
        r#"
        SELECT * FROM issues
        WHERE audit_id = ?
        ORDER BY CASE severity
            WHEN 'critical' THEN 0
            WHEN 'serious' THEN 1
            WHEN 'moderate' THEN 2
            ELSE 3
        END, id
        "#,
    )
    .bind(audit_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(hydrate_issue).collect()
}

fn hydrate_issue(row: &sqlx::sqlite::SqliteRow) -> Result<Issue> {
    let severity: String = row.get("severity");
    let category: String = row.get("category");
    let created_at: String = row.get("created_at");

    Ok(Issue {
        id: Some(row.get("id")),
        audit_id: row.get("audit_id"),
        severity: severity.parse::<IssueSeverity>()?,
        category: category.parse::<IssueCategory>()?,
        title: row.get("title"),
        description: row.get("description"),
        element_selector: row.get("element_selector"),
        help_url: row.get("help_url"),
        created_at: parse_timestamp(&created_at)?,
    })
}
