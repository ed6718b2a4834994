//! Audit record and status

use crate::models::AccessibilityScore;
use chrono::{DateTime, Utc};
use pagewatch_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Audit lifecycle status
///
/// Completed and Failed are terminal; an audit is finalized within the
/// orchestration run that created it and never re-opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Pending => "pending",
            AuditStatus::InProgress => "in_progress",
            AuditStatus::Completed => "completed",
            AuditStatus::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuditStatus::Pending => "Pending",
            AuditStatus::InProgress => "In Progress",
            AuditStatus::Completed => "Completed",
            AuditStatus::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            AuditStatus::Completed | AuditStatus::Failed => true,
            AuditStatus::Pending | AuditStatus::InProgress => false,
        }
    }
}

impl FromStr for AuditStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(AuditStatus::Pending),
            "in_progress" => Ok(AuditStatus::InProgress),
            "completed" => Ok(AuditStatus::Completed),
            "failed" => Ok(AuditStatus::Failed),
            other => Err(Error::InvalidInput(format!("Unknown audit status: {other}"))),
        }
    }
}

/// One scoring attempt for one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audit {
    /// Assigned by storage on insert
    pub id: Option<i64>,
    pub page_id: i64,
    pub score: AccessibilityScore,
    pub status: AuditStatus,
    /// Set once at creation, never mutated
    pub audit_date: DateTime<Utc>,
    /// Raw scoring payload, set only on success
    pub raw_response: Option<String>,
    /// Set only on failure
    pub error_message: Option<String>,
    /// Incremented once per exhausted rate-limit attempt
    pub retry_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Audit {
    /// New in-progress audit at the start of an orchestration run
    pub fn in_progress(page_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            page_id,
            score: AccessibilityScore::zero(),
            status: AuditStatus::InProgress,
            audit_date: now,
            raw_response: None,
            error_message: None,
            retry_count: 0,
            created_at: now,
        }
    }

    pub fn increment_retry_count(&mut self) {
        self.retry_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            AuditStatus::Pending,
            AuditStatus::InProgress,
            AuditStatus::Completed,
            AuditStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<AuditStatus>().unwrap(), status);
        }
        assert!("bogus".parse::<AuditStatus>().is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(AuditStatus::Completed.is_terminal());
        assert!(AuditStatus::Failed.is_terminal());
        assert!(!AuditStatus::Pending.is_terminal());
        assert!(!AuditStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_in_progress_constructor() {
        let now = Utc::now();
        let audit = Audit::in_progress(7, now);

        assert_eq!(audit.id, None);
        assert_eq!(audit.page_id, 7);
        assert_eq!(audit.status, AuditStatus::InProgress);
        assert_eq!(audit.score.value(), 0);
        assert_eq!(audit.retry_count, 0);
        assert_eq!(audit.audit_date, now);
        assert!(audit.raw_response.is_none());
        assert!(audit.error_message.is_none());
    }
}
