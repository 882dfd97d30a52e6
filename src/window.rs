//! Capacity-bounded window of unique numbers
//!
//! Insertion-ordered and deduplicated: a merge keeps the first occurrence of
//! each value and evicts from the front once the sequence exceeds capacity,
//! so the oldest-admitted values are dropped first.

use std::collections::HashSet;

/// Merge `existing` and `incoming` into a deduplicated sequence capped at
/// `capacity`.
///
/// First-seen order is preserved; when the deduplicated sequence exceeds
/// `capacity`, only the last `capacity` elements survive. `existing` is
/// expected to already be duplicate-free; `incoming` may repeat values
/// freely. Neither input is mutated.
pub fn merge_unique(existing: &[i64], incoming: &[i64], capacity: usize) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(existing.len() + incoming.len());
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());

    for &value in existing.iter().chain(incoming) {
        if seen.insert(value) {
            merged.push(value);
        }
    }

    if merged.len() > capacity {
        merged.drain(..merged.len() - capacity);
    }

    merged
}

/// Bounded window of the most recently admitted unique values.
///
/// Lives for the session: created empty, mutated only through `commit`,
/// never shrinks. Callers observe it through cloned snapshots.
#[derive(Debug, Clone)]
pub struct UniqueWindow {
    capacity: usize,
    values: Vec<i64>,
}

impl UniqueWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Saturated once the window holds exactly `capacity` values; only then
    /// is the average defined.
    pub fn is_saturated(&self) -> bool {
        self.capacity > 0 && self.values.len() == self.capacity
    }

    /// Compute what the window would hold after admitting `incoming`,
    /// without committing it. The current state stays valid as the caller's
    /// before-snapshot.
    pub fn merged(&self, incoming: &[i64]) -> Vec<i64> {
        merge_unique(&self.values, incoming, self.capacity)
    }

    /// Replace the window contents with a sequence produced by [`merged`].
    ///
    /// [`merged`]: UniqueWindow::merged
    pub fn commit(&mut self, values: Vec<i64>) {
        debug_assert!(values.len() <= self.capacity);
        self.values = values;
    }

    /// Arithmetic mean rounded to two decimals, defined only at saturation.
    pub fn average(&self) -> Option<f64> {
        if !self.is_saturated() {
            return None;
        }
        let sum: i64 = self.values.iter().sum();
        let mean = sum as f64 / self.values.len() as f64;
        Some((mean * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let merged = merge_unique(&[1, 2, 3], &[2, 2, 4], 5);
        assert_eq!(merged, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_merge_evicts_oldest_first() {
        let merged = merge_unique(&[1, 2, 3, 4, 5], &[6], 5);
        assert_eq!(merged, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_merge_empty_incoming_is_identity() {
        let merged = merge_unique(&[7, 8, 9], &[], 10);
        assert_eq!(merged, vec![7, 8, 9]);
    }

    #[test]
    fn test_merge_zero_capacity_yields_empty() {
        let merged = merge_unique(&[1, 2], &[3], 0);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_invariants_hold_across_sequences() {
        let batches = [
            vec![3, 1, 4, 1, 5],
            vec![9, 2, 6, 5, 3, 5],
            vec![],
            vec![8, 9, 7, 9, 3, 2],
            vec![3, 8, 4, 6, 2, 6],
        ];

        let mut window: Vec<i64> = Vec::new();
        for incoming in &batches {
            window = merge_unique(&window, incoming, 5);

            assert!(window.len() <= 5);
            let mut sorted = window.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), window.len(), "duplicate in {:?}", window);
        }
    }

    #[test]
    fn test_average_only_at_saturation() {
        let mut window = UniqueWindow::new(3);
        window.commit(window.merged(&[1, 2]));
        assert_eq!(window.average(), None);

        window.commit(window.merged(&[3]));
        assert_eq!(window.values(), &[1, 2, 3]);
        assert_eq!(window.average(), Some(2.0));
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let mut window = UniqueWindow::new(3);
        window.commit(window.merged(&[1, 2, 4]));
        // 7 / 3 = 2.333...
        assert_eq!(window.average(), Some(2.33));
    }

    #[test]
    fn test_merged_does_not_mutate_window() {
        let mut window = UniqueWindow::new(4);
        window.commit(window.merged(&[1, 2]));

        let preview = window.merged(&[3, 4, 5]);
        assert_eq!(preview, vec![2, 3, 4, 5]);
        assert_eq!(window.values(), &[1, 2], "preview must not commit");
    }
}
