//! Audit orchestrator
//!
//! Owns the lifecycle of a single audit: creates a provisional record,
//! drives the scoring client under the retry policy, classifies
//! findings, persists the outcome, and triggers comparison against the
//! page's previous completed audit.
//!
//! A remote-service failure is a normal, persisted outcome (a Failed
//! audit), never an error to the caller. Only a missing page or a
//! storage fault surfaces as an error.

use crate::db;
use crate::models::{AccessibilityScore, Audit, AuditStatus, Issue};
use crate::services::classifier;
use crate::services::comparison;
use crate::services::pagespeed::{FailingCheck, ScoringClient, ScoringError, ScoringResult};
use crate::services::retry::RetryPolicy;
use chrono::{DateTime, Utc};
use pagewatch_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Orchestrates single audit runs
pub struct AuditOrchestrator<C: ScoringClient> {
    db: SqlitePool,
    client: C,
    retry_policy: RetryPolicy,
}

impl<C: ScoringClient> AuditOrchestrator<C> {
    pub fn new(db: SqlitePool, client: C, retry_policy: RetryPolicy) -> Self {
        Self {
            db,
            client,
            retry_policy,
        }
    }

    /// Run one audit for a page
    ///
    /// Exactly one audit row is created per call and it reaches a
    /// terminal state (Completed or Failed) before this returns.
    pub async fn run_audit(&self, page_id: i64) -> Result<Audit> {
        let page = db::find_page(&self.db, page_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Page {page_id} not found")))?;

        let now = Utc::now();
        let mut audit = Audit::in_progress(page_id, now);
        db::save_audit(&self.db, &mut audit).await?;

        info!(page_id, audit_id = ?audit.id, url = %page.url, "Starting audit");

        match self.execute_with_retry(&page.url, &mut audit).await {
            Ok(result) => {
                audit.score = AccessibilityScore::new(result.score)?;
                audit.status = AuditStatus::Completed;
                audit.raw_response = Some(result.raw_json.clone());
                db::update_audit(&self.db, &audit).await?;

                let mut issues = build_issues(&audit, &result.failing_checks, Utc::now())?;
                db::save_issues(&self.db, &mut issues).await?;

                self.create_comparison_if_previous_exists(&audit, &issues).await?;

                db::update_page_audit_time(&self.db, page_id, Utc::now()).await?;

                info!(
                    audit_id = ?audit.id,
                    score = audit.score.value(),
                    grade = audit.score.grade(),
                    issues = issues.len(),
                    retry_count = audit.retry_count,
                    "Audit completed"
                );
            }
            Err(e) => {
                audit.status = AuditStatus::Failed;
                audit.error_message = Some(e.to_string());
                db::update_audit(&self.db, &audit).await?;

                warn!(
                    audit_id = ?audit.id,
                    retry_count = audit.retry_count,
                    error = %e,
                    "Audit failed"
                );
            }
        }

        Ok(audit)
    }

    /// Drive the scoring client under the retry policy
    ///
    /// Each rate-limit signal increments the audit's retry count and
    /// suspends for the policy delay before the next attempt. Any
    /// other failure stops immediately. On exhaustion the last
    /// rate-limit failure is surfaced.
    async fn execute_with_retry(
        &self,
        url: &str,
        audit: &mut Audit,
    ) -> std::result::Result<ScoringResult, ScoringError> {
        let mut last_rate_limit = None;

        while self.retry_policy.should_retry(audit.retry_count) {
            match self.client.run_audit(url).await {
                Ok(result) => return Ok(result),
                Err(ScoringError::RateLimited) => {
                    last_rate_limit = Some(ScoringError::RateLimited);
                    audit.increment_retry_count();

                    let delay = self.retry_policy.delay(audit.retry_count - 1);
                    if !delay.is_zero() {
                        debug!(
                            url = %url,
                            retry_count = audit.retry_count,
                            delay_ms = delay.as_millis() as u64,
                            "Rate limited, backing off"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_rate_limit.unwrap_or(ScoringError::RetriesExhausted))
    }

    /// Compare against the page's previous completed audit, if any
    async fn create_comparison_if_previous_exists(
        &self,
        audit: &Audit,
        current_issues: &[Issue],
    ) -> Result<()> {
        let audit_id = audit
            .id
            .ok_or_else(|| Error::Internal("Audit id missing after save".to_string()))?;

        let Some(previous) =
            db::find_latest_completed_excluding(&self.db, audit.page_id, audit_id).await?
        else {
            return Ok(());
        };

        let previous_id = previous
            .id
            .ok_or_else(|| Error::Internal("Stored audit has no id".to_string()))?;
        let previous_issues = db::find_issues_by_audit(&self.db, previous_id).await?;

        let mut result =
            comparison::compare(audit, &previous, current_issues, &previous_issues, Utc::now())?;
        db::save_comparison(&self.db, &mut result).await?;

        debug!(
            current_audit_id = audit_id,
            previous_audit_id = previous_id,
            score_delta = result.score_delta,
            trend = result.trend.as_str(),
            "Comparison recorded"
        );

        Ok(())
    }
}

/// Classify failing checks into issue records for a completed audit
fn build_issues(
    audit: &Audit,
    failing_checks: &[FailingCheck],
    now: DateTime<Utc>,
) -> Result<Vec<Issue>> {
    let audit_id = audit
        .id
        .ok_or_else(|| Error::Internal("Audit id missing after save".to_string()))?;

    Ok(failing_checks
        .iter()
        .map(|check| Issue {
            id: None,
            audit_id,
            severity: classifier::severity(check.sub_score),
            category: classifier::categorize(&check.id),
            title: check.title.clone(),
            description: check.description.clone(),
            element_selector: check.selector.clone(),
            help_url: check.help_url.clone(),
            created_at: now,
        })
        .collect())
}
