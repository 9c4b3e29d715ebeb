use std::collections::BTreeSet;

use gt_core::{GridView, Result, ScoredCoordinate, TopKResult};

use crate::SelectionStrategy;

/// Ordered set of at most K entries. O(N log K) time, O(K) space.
///
/// The set is keyed on the whole (value, row, col) key; a value-only key
/// would collapse equal-valued cells into one entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedSetScan;

impl SelectionStrategy for OrderedSetScan {
    fn name(&self) -> &'static str {
        "ordered_set_scan"
    }

    fn select_within<G: GridView>(&self, grid: &G, k: usize) -> Result<TopKResult<G::Value>> {
        let mut kept: BTreeSet<ScoredCoordinate<G::Value>> = BTreeSet::new();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let candidate = ScoredCoordinate::at(row, col, grid.value_at(row, col)?);
                if kept.len() < k {
                    kept.insert(candidate);
                    continue;
                }
                // The last element ranks lowest.
                if kept.last().is_some_and(|weakest| candidate < *weakest) {
                    kept.pop_last();
                    kept.insert(candidate);
                }
            }
        }
        Ok(TopKResult::from_canonical(kept.into_iter().collect()))
    }
}
