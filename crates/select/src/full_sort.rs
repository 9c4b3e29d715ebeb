use gt_core::{GridView, Result, TopKResult};

use crate::SelectionStrategy;

/// Materializes every cell, sorts, truncates. O(N log N) time, O(N) space.
///
/// Slow but obviously correct; the other strategies are checked against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullSort;

impl SelectionStrategy for FullSort {
    fn name(&self) -> &'static str {
        "full_sort"
    }

    fn select_within<G: GridView>(&self, grid: &G, k: usize) -> Result<TopKResult<G::Value>> {
        let mut cells = Vec::with_capacity(grid.size());
        let mut cursor = grid.cursor();
        for _ in 0..grid.size() {
            cells.push(cursor.next_scored()?);
        }
        cells.sort_unstable();
        cells.truncate(k);
        Ok(TopKResult::from_canonical(cells))
    }
}
