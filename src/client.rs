//! HTTP access to the number-generator service
//!
//! One GET per category, no authentication. A response body whose `numbers`
//! field is missing or malformed normalizes to the empty list; only the
//! transport and the HTTP status can fail a fetch.

use crate::source::SourceCategory;
use async_trait::async_trait;
use serde::Deserialize;

/// Why a fetch produced no numbers.
///
/// All three variants surface to the caller as a single "fetch failed"
/// condition that leaves the window untouched; they differ only in
/// diagnostics.
#[derive(Debug)]
pub enum FetchError {
    /// Network or connection failure, including body-read failures.
    Transport(String),
    /// The time budget elapsed before the upstream responded.
    Timeout,
    /// Non-success HTTP status from the upstream.
    Upstream(u16),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "Transport error: {}", e),
            FetchError::Timeout => write!(f, "Request exceeded its time budget"),
            FetchError::Upstream(status) => write!(f, "Upstream returned HTTP {}", status),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Upstream(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Expected payload of every number endpoint: `{"numbers": [...]}`.
#[derive(Debug, Deserialize)]
struct NumbersPayload {
    #[serde(default)]
    numbers: Option<Vec<i64>>,
}

/// Normalize a response body into a number list.
///
/// A missing, null, or non-array `numbers` field decodes to the empty list
/// rather than an error, keeping "malformed" and "empty" behaviorally
/// identical downstream.
fn normalize_numbers(body: &[u8]) -> Vec<i64> {
    match serde_json::from_slice::<NumbersPayload>(body) {
        Ok(payload) => payload.numbers.unwrap_or_default(),
        Err(e) => {
            log::debug!("Malformed numbers payload treated as empty: {}", e);
            Vec::new()
        }
    }
}

/// Source of raw numbers for one category.
///
/// Seam for the aggregator: production uses [`HttpNumberSource`], tests
/// substitute scripted implementations.
#[async_trait]
pub trait NumberSource: Send + Sync {
    async fn fetch_numbers(&self, category: SourceCategory) -> Result<Vec<i64>, FetchError>;
}

/// Number source backed by the HTTP number-generator service.
///
/// The client carries no request timeout of its own; the aggregator owns the
/// time budget and drops the in-flight request when it loses the race.
pub struct HttpNumberSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNumberSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl NumberSource for HttpNumberSource {
    async fn fetch_numbers(&self, category: SourceCategory) -> Result<Vec<i64>, FetchError> {
        let url = format!("{}/{}", self.base_url, category.endpoint_path());

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Upstream(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(normalize_numbers(&body))
    }
}
