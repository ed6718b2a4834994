//! PageSpeed Insights API client
//!
//! Runs one accessibility scoring request against the remote API and
//! maps the Lighthouse payload into a `ScoringResult`. HTTP 429 maps
//! to a distinguishable rate-limit error so the orchestrator can
//! retry; every other non-success is a generic API failure.

use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

const PAGESPEED_BASE_URL: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
const USER_AGENT: &str = "PageWatch/0.1.0 (https://github.com/pagewatch/pagewatch)";

/// Scoring client errors
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Remote service answered HTTP 429; retryable
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Remote service answered with a non-success status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Failed to parse the scoring payload
    #[error("Parse error: {0}")]
    Parse(String),

    /// Retry budget exhausted with no recorded rate-limit failure
    #[error("Max retries exceeded")]
    RetriesExhausted,
}

/// One failing accessibility check from the scoring payload
#[derive(Debug, Clone)]
pub struct FailingCheck {
    /// Check identifier (e.g. "color-contrast", "image-alt")
    pub id: String,
    pub title: String,
    pub description: String,
    /// Check sub-score in 0..1; None means not scored
    pub sub_score: Option<f64>,
    pub help_url: Option<String>,
    /// First offending element selector, when reported
    pub selector: Option<String>,
}

/// Outcome of one successful scoring request
#[derive(Debug, Clone)]
pub struct ScoringResult {
    /// Category score scaled to 0..=100
    pub score: i64,
    pub failing_checks: Vec<FailingCheck>,
    /// Full payload, persisted verbatim on the audit
    pub raw_json: String,
}

/// Seam between the orchestrator and the remote scoring service
pub trait ScoringClient {
    /// Run one scoring request for a page URL
    fn run_audit(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<ScoringResult, ScoringError>> + Send;
}

// -- Lighthouse payload shape (only the fields we read) --

#[derive(Debug, Deserialize)]
struct PageSpeedResponse {
    #[serde(rename = "lighthouseResult")]
    lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize)]
struct LighthouseResult {
    categories: Option<Categories>,
    audits: Option<HashMap<String, LighthouseAudit>>,
}

#[derive(Debug, Deserialize)]
struct Categories {
    accessibility: Option<CategoryScore>,
}

#[derive(Debug, Deserialize)]
struct CategoryScore {
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LighthouseAudit {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    score: Option<f64>,
    #[serde(rename = "scoreDisplayMode", default)]
    score_display_mode: String,
    #[serde(rename = "helpUrl")]
    help_url: Option<String>,
    details: Option<AuditDetails>,
}

#[derive(Debug, Deserialize)]
struct AuditDetails {
    items: Option<Vec<DetailItem>>,
}

#[derive(Debug, Deserialize)]
struct DetailItem {
    node: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
struct NodeRef {
    selector: Option<String>,
}

/// Parse a raw PageSpeed payload into a scoring result
///
/// The category score (0..1) is scaled to 0..=100 and rounded. Only
/// binary-scored checks with a score below 1 count as failing.
pub fn parse_scoring_response(json: &str) -> std::result::Result<ScoringResult, ScoringError> {
    let response: PageSpeedResponse =
        serde_json::from_str(json).map_err(|e| ScoringError::Parse(e.to_string()))?;

    let lighthouse = response.lighthouse_result.unwrap_or(LighthouseResult {
        categories: None,
        audits: None,
    });

    let score = lighthouse
        .categories
        .as_ref()
        .and_then(|c| c.accessibility.as_ref())
        .and_then(|a| a.score)
        .map(|s| (s * 100.0).round() as i64)
        .unwrap_or(0);

    let mut failing_checks = Vec::new();
    for check in lighthouse.audits.unwrap_or_default().into_values() {
        let failing = check.score_display_mode == "binary"
            && check.score.is_some_and(|s| s < 1.0);
        if !failing {
            continue;
        }

        let selector = check
            .details
            .as_ref()
            .and_then(|d| d.items.as_ref())
            .and_then(|items| {
                items
                    .iter()
                    .find_map(|item| item.node.as_ref().and_then(|n| n.selector.clone()))
            });

        failing_checks.push(FailingCheck {
            id: check.id,
            title: check.title,
            description: check.description,
            sub_score: check.score,
            help_url: check.help_url,
            selector,
        });
    }

    Ok(ScoringResult {
        score,
        failing_checks,
        raw_json: json.to_string(),
    })
}

/// PageSpeed Insights API client
pub struct PageSpeedClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PageSpeedClient {
    pub fn new(api_key: impl Into<String>) -> std::result::Result<Self, ScoringError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScoringError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: PAGESPEED_BASE_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Point the client at a different endpoint (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl ScoringClient for PageSpeedClient {
    async fn run_audit(&self, url: &str) -> std::result::Result<ScoringResult, ScoringError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("url", url),
            ("category", "accessibility"),
            ("strategy", "desktop"),
        ];
        if !self.api_key.is_empty() {
            params.push(("key", &self.api_key));
        }

        tracing::debug!(url = %url, "Querying PageSpeed API");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ScoringError::Network(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 429 {
            return Err(ScoringError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScoringError::Network(e.to_string()))?;

        let result = parse_scoring_response(&body)?;

        tracing::info!(
            url = %url,
            score = result.score,
            failing_checks = result.failing_checks.len(),
            "PageSpeed audit successful"
        );

        Ok(result)
    }
}
