//! Aggregator configuration from environment variables

use std::env;
use std::time::Duration;

/// Base URL of the number-generator service in the reference deployment.
pub const DEFAULT_BASE_URL: &str = "http://20.244.56.144/evaluation-service";

/// Default window capacity.
pub const DEFAULT_WINDOW_CAPACITY: usize = 10;

/// Default per-request time budget in milliseconds, applied uniformly to
/// every category.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 500;

/// Fixed constants for one aggregator instance.
///
/// Loaded once from environment variables with defaults; not mutable at
/// runtime.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Base URL of the number-generator service
    pub base_url: String,

    /// Maximum number of unique values the window holds
    pub window_capacity: usize,

    /// Per-request time budget in milliseconds
    pub time_budget_ms: u64,
}

impl AggregatorConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `NUMFLOW_BASE_URL` (default: the reference deployment URL)
    /// - `NUMFLOW_WINDOW_CAPACITY` (default: 10)
    /// - `NUMFLOW_TIME_BUDGET_MS` (default: 500)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("NUMFLOW_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),

            window_capacity: env::var("NUMFLOW_WINDOW_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_WINDOW_CAPACITY),

            time_budget_ms: env::var("NUMFLOW_TIME_BUDGET_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIME_BUDGET_MS),
        }
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
        }
    }
}
