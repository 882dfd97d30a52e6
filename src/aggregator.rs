//! Timed fetch orchestration over the bounded unique window
//!
//! One fetch per invocation: snapshot the window, race the upstream request
//! against the time budget, merge and commit on success, report failures
//! without touching state. The window is owned here exclusively; callers
//! only ever see cloned snapshots.

use crate::client::{FetchError, NumberSource};
use crate::config::AggregatorConfig;
use crate::source::SourceCategory;
use crate::window::UniqueWindow;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Outcome of one fetch invocation.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// Which source category was queried
    pub category: SourceCategory,
    /// Window snapshot immediately before the merge
    pub window_before: Vec<i64>,
    /// Window snapshot after the merge; equals `window_before` on failure
    pub window_after: Vec<i64>,
    /// Numbers the upstream returned for this invocation, pre-dedup
    pub raw_numbers: Vec<i64>,
    /// Mean of `window_after` iff the window is saturated; on failure, the
    /// previously published value
    pub average: Option<f64>,
    /// Diagnostic message when the fetch failed or timed out
    pub error: Option<String>,
}

struct AggregatorState {
    window: UniqueWindow,
    /// Last average handed to a caller; kept so a failed invocation can keep
    /// reporting it without recomputation.
    published_average: Option<f64>,
}

/// Orchestrates timed fetches and owns the window.
///
/// The state mutex is held for the whole invocation (snapshot, race,
/// commit), so near-simultaneous triggers cannot interleave their merges and
/// at most one commit happens per invocation. The time budget bounds how
/// long the lock can be held across the network call.
pub struct WindowAggregator<S: NumberSource> {
    source: S,
    time_budget: Duration,
    state: Mutex<AggregatorState>,
}

impl<S: NumberSource> WindowAggregator<S> {
    pub fn new(source: S, window_capacity: usize, time_budget: Duration) -> Self {
        Self {
            source,
            time_budget,
            state: Mutex::new(AggregatorState {
                window: UniqueWindow::new(window_capacity),
                published_average: None,
            }),
        }
    }

    pub fn from_config(source: S, config: &AggregatorConfig) -> Self {
        Self::new(source, config.window_capacity, config.time_budget())
    }

    /// Run one fetch invocation against `category`.
    ///
    /// On success within the budget, the returned numbers are merged into
    /// the window and the result committed; the average is recomputed and
    /// republished (cleared again if the window is still unsaturated). On
    /// timeout, transport failure, or a non-success status, nothing is
    /// committed and the previously published average is reported unchanged.
    ///
    /// The upstream future is dropped the moment the timer wins the race,
    /// which aborts the in-flight request; a late response can never commit
    /// after the deadline.
    pub async fn request_window(&self, category: SourceCategory) -> FetchReport {
        let mut state = self.state.lock().await;
        let window_before = state.window.values().to_vec();

        let raw_numbers = match timeout(self.time_budget, self.source.fetch_numbers(category)).await
        {
            Ok(Ok(numbers)) => numbers,
            Ok(Err(err)) => {
                log::warn!("Fetch from '{}' failed: {}", category.as_str(), err);
                return failure_report(category, window_before, state.published_average, &err);
            }
            Err(_elapsed) => {
                log::warn!(
                    "Fetch from '{}' exceeded the {}ms budget, request aborted",
                    category.as_str(),
                    self.time_budget.as_millis()
                );
                return failure_report(
                    category,
                    window_before,
                    state.published_average,
                    &FetchError::Timeout,
                );
            }
        };

        let window_after = state.window.merged(&raw_numbers);
        state.window.commit(window_after.clone());

        let average = state.window.average();
        state.published_average = average;

        log::debug!(
            "Committed {} numbers from '{}', window at {}/{}",
            raw_numbers.len(),
            category.as_str(),
            window_after.len(),
            state.window.capacity()
        );

        FetchReport {
            category,
            window_before,
            window_after,
            raw_numbers,
            average,
            error: None,
        }
    }
}

fn failure_report(
    category: SourceCategory,
    window_before: Vec<i64>,
    published_average: Option<f64>,
    err: &FetchError,
) -> FetchReport {
    FetchReport {
        category,
        window_after: window_before.clone(),
        window_before,
        raw_numbers: Vec::new(),
        average: published_average,
        error: Some(err.to_string()),
    }
}
