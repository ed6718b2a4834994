//! Scheduled audit runner
//!
//! Selects which enabled pages are due per their cadence and drives
//! the orchestrator across the fleet, one page at a time. Failures
//! are isolated per page: one page's error never aborts the pass.

use crate::db;
use crate::models::{Audit, Page};
use crate::services::orchestrator::AuditOrchestrator;
use crate::services::pagespeed::ScoringClient;
use chrono::{DateTime, Duration, Utc};
use pagewatch_common::Result;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Fleet-wide scheduled audit runner
pub struct Scheduler<C: ScoringClient> {
    db: SqlitePool,
    orchestrator: AuditOrchestrator<C>,
}

impl<C: ScoringClient> Scheduler<C> {
    pub fn new(db: SqlitePool, orchestrator: AuditOrchestrator<C>) -> Self {
        Self { db, orchestrator }
    }

    /// Run one scheduler pass at the current time
    pub async fn run(&self) -> Result<Vec<Audit>> {
        self.run_at(Utc::now()).await
    }

    /// Run one scheduler pass against an explicit clock
    ///
    /// Returns one entry per page whose audit run returned normally;
    /// a Failed audit is a normal entry, a page whose run errored is
    /// skipped and logged.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<Vec<Audit>> {
        let pages = db::find_enabled_pages(&self.db).await?;
        let mut results = Vec::new();

        for page in &pages {
            let Some(page_id) = page.id else { continue };

            if !is_due(page, now) {
                debug!(page_id, url = %page.url, "Page not due, skipping");
                continue;
            }

            match self.orchestrator.run_audit(page_id).await {
                Ok(audit) => results.push(audit),
                Err(e) => {
                    warn!(page_id, url = %page.url, error = %e, "Audit errored, continuing with next page");
                }
            }
        }

        info!(
            enabled = pages.len(),
            audited = results.len(),
            "Scheduler pass complete"
        );

        Ok(results)
    }
}

/// Whether a page is due for a new audit at `now`
///
/// A never-audited page is always due; otherwise due once the cadence
/// interval has elapsed since the last audit.
pub fn is_due(page: &Page, now: DateTime<Utc>) -> bool {
    match page.last_audited_at {
        None => true,
        Some(last) => now >= last + Duration::hours(page.cadence.interval_hours()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cadence;

    fn page_last_audited(cadence: Cadence, hours_ago: i64, now: DateTime<Utc>) -> Page {
        let mut page = Page::new("https://example.com/", cadence, now);
        page.id = Some(1);
        page.last_audited_at = Some(now - Duration::hours(hours_ago));
        page
    }

    #[test]
    fn test_never_audited_is_due() {
        let now = Utc::now();
        let page = Page::new("https://example.com/", Cadence::Monthly, now);
        assert!(is_due(&page, now));
    }

    #[test]
    fn test_daily_cadence() {
        let now = Utc::now();
        assert!(is_due(&page_last_audited(Cadence::Daily, 25, now), now));
        assert!(is_due(&page_last_audited(Cadence::Daily, 24, now), now));
        assert!(!is_due(&page_last_audited(Cadence::Daily, 23, now), now));
    }

    #[test]
    fn test_weekly_cadence() {
        let now = Utc::now();
        // 6 days ago: not due
        assert!(!is_due(&page_last_audited(Cadence::Weekly, 144, now), now));
        assert!(is_due(&page_last_audited(Cadence::Weekly, 168, now), now));
    }

    #[test]
    fn test_long_cadences() {
        let now = Utc::now();
        assert!(!is_due(&page_last_audited(Cadence::Biweekly, 335, now), now));
        assert!(is_due(&page_last_audited(Cadence::Biweekly, 336, now), now));
        assert!(!is_due(&page_last_audited(Cadence::Monthly, 719, now), now));
        assert!(is_due(&page_last_audited(Cadence::Monthly, 720, now), now));
    }
}
