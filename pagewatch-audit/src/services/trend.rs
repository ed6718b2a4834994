//! Trend analytics over stored audit history
//!
//! All functions take a window of audits ordered newest-first, the
//! convention the storage layer returns. The trend verdict measures
//! net direction across the whole window: a dip in the middle does
//! not change it.

use crate::models::{Audit, Trend};
use serde::Serialize;

/// One point of a score time series
#[derive(Debug, Clone, Serialize)]
pub struct ScorePoint {
    pub score: i64,
    /// Calendar date without time, `YYYY-MM-DD`
    pub date: String,
}

/// Net trend direction across the window
///
/// Fewer than two audits is always Stable.
pub fn trend(audits: &[Audit]) -> Trend {
    if audits.len() < 2 {
        return Trend::Stable;
    }

    let newest = &audits[0];
    let oldest = &audits[audits.len() - 1];
    Trend::from_delta(newest.score.delta(&oldest.score))
}

/// Mean score, rounded half away from zero; 0 for an empty window
pub fn average(audits: &[Audit]) -> i64 {
    if audits.is_empty() {
        return 0;
    }

    let total: i64 = audits.iter().map(|a| a.score.value()).sum();
    (total as f64 / audits.len() as f64).round() as i64
}

/// Lazy score/date series in input order
pub fn series(audits: &[Audit]) -> impl Iterator<Item = ScorePoint> + '_ {
    audits.iter().map(|audit| ScorePoint {
        score: audit.score.value(),
        date: audit.audit_date.format("%Y-%m-%d").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessibilityScore, AuditStatus};
    use chrono::{TimeZone, Utc};

    fn window(scores: &[i64]) -> Vec<Audit> {
        // Newest-first: descending dates matching the input order
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                let date = Utc
                    .with_ymd_and_hms(2026, 3, 20 - i as u32, 12, 0, 0)
                    .unwrap();
                Audit {
                    id: Some(i as i64 + 1),
                    page_id: 1,
                    score: AccessibilityScore::new(score).unwrap(),
                    status: AuditStatus::Completed,
                    audit_date: date,
                    raw_response: None,
                    error_message: None,
                    retry_count: 0,
                    created_at: date,
                }
            })
            .collect()
    }

    #[test]
    fn test_trend_improving() {
        assert_eq!(trend(&window(&[85, 80, 75, 70])), Trend::Improving);
    }

    #[test]
    fn test_trend_degrading() {
        assert_eq!(trend(&window(&[75, 80, 85, 90])), Trend::Degrading);
    }

    #[test]
    fn test_trend_net_direction_ignores_dips() {
        // Dip in the middle, net improvement across endpoints
        assert_eq!(trend(&window(&[85, 60, 70])), Trend::Improving);
    }

    #[test]
    fn test_trend_small_windows_stable() {
        assert_eq!(trend(&window(&[])), Trend::Stable);
        assert_eq!(trend(&window(&[80])), Trend::Stable);
        assert_eq!(trend(&window(&[80, 80])), Trend::Stable);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&window(&[70, 80, 90])), 80);
        assert_eq!(average(&window(&[])), 0);
        // 70 + 75 = 145, mean 72.5 rounds away from zero to 73
        assert_eq!(average(&window(&[70, 75])), 73);
    }

    #[test]
    fn test_series_order_and_format() {
        let audits = window(&[85, 70]);
        let points: Vec<ScorePoint> = series(&audits).collect();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].score, 85);
        assert_eq!(points[0].date, "2026-03-20");
        assert_eq!(points[1].score, 70);
        assert_eq!(points[1].date, "2026-03-19");
    }
}
