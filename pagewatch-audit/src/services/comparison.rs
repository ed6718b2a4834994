//! Comparison engine
//!
//! Diffs a newly completed audit's findings against the page's
//! previous completed audit. Issue identity across audits is the
//! description text only; category, severity, and selector do not
//! participate in the diff.

use crate::models::{Audit, AuditComparison, Issue, Trend};
use chrono::{DateTime, Utc};
use pagewatch_common::{Error, Result};
use std::collections::HashSet;

/// Build the comparison between two audits of the same page
///
/// Both audits must already be persisted (ids assigned). The issue
/// sets themselves are discarded; only the counts are stored.
pub fn compare(
    current: &Audit,
    previous: &Audit,
    current_issues: &[Issue],
    previous_issues: &[Issue],
    now: DateTime<Utc>,
) -> Result<AuditComparison> {
    let current_id = current
        .id
        .ok_or_else(|| Error::InvalidInput("Current audit has no id".to_string()))?;
    let previous_id = previous
        .id
        .ok_or_else(|| Error::InvalidInput("Previous audit has no id".to_string()))?;

    let delta = current.score.delta(&previous.score);

    let current_descriptions: HashSet<&str> =
        current_issues.iter().map(|i| i.description.as_str()).collect();
    let previous_descriptions: HashSet<&str> =
        previous_issues.iter().map(|i| i.description.as_str()).collect();

    let new_issues = current_descriptions.difference(&previous_descriptions).count();
    let resolved_issues = previous_descriptions.difference(&current_descriptions).count();
    let persistent_issues = current_descriptions.intersection(&previous_descriptions).count();

    Ok(AuditComparison {
        id: None,
        current_audit_id: current_id,
        previous_audit_id: previous_id,
        score_delta: delta,
        new_issues_count: new_issues as i64,
        resolved_issues_count: resolved_issues as i64,
        persistent_issues_count: persistent_issues as i64,
        trend: Trend::from_delta(delta),
        created_at: now,
    })
}
