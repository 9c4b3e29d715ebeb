use std::ops::Range;

use gt_core::{Coordinate, GridView, Result, TopKResult};

use crate::{BoundedTopK, SelectionStrategy};

/// Single row-major pass into a `BoundedTopK`. O(N log K) time, O(K) space.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundedHeapScan;

impl SelectionStrategy for BoundedHeapScan {
    fn name(&self) -> &'static str {
        "bounded_heap_scan"
    }

    fn select_within<G: GridView>(&self, grid: &G, k: usize) -> Result<TopKResult<G::Value>> {
        let mut topk = BoundedTopK::new(k);
        scan_rows(grid, 0..grid.rows(), &mut topk)?;
        Ok(topk.drain())
    }
}

/// Offers every cell of `rows` to `topk`, row-major, by random access.
///
/// Rows past the grid fail with `OutOfBounds`; the range is not clipped.
pub fn scan_rows<G: GridView>(
    grid: &G,
    rows: Range<usize>,
    topk: &mut BoundedTopK<G::Value>,
) -> Result<()> {
    let cols = grid.cols();
    for row in rows {
        for col in 0..cols {
            let value = grid.value_at(row, col)?;
            topk.offer(Coordinate::new(row, col), value);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::{check_bounds, SelectError};

    struct Diagonal(usize);

    impl GridView for Diagonal {
        type Value = u8;

        fn rows(&self) -> usize {
            self.0
        }

        fn cols(&self) -> usize {
            self.0
        }

        fn value_at(&self, row: usize, col: usize) -> Result<u8> {
            check_bounds(row, col, self.0, self.0)?;
            Ok(u8::from(row == col) * (row as u8 + 1))
        }
    }

    #[test]
    fn scan_rows_only_sees_its_range() {
        let grid = Diagonal(6);
        let mut topk = BoundedTopK::new(2);
        scan_rows(&grid, 1..3, &mut topk).unwrap();
        assert_eq!(topk.stats().offered(), 12);
        assert_eq!(
            topk.drain().coordinates(),
            vec![Coordinate::new(2, 2), Coordinate::new(1, 1)]
        );
    }

    #[test]
    fn scan_rows_past_the_grid_fails() {
        let mut topk = BoundedTopK::new(2);
        let err = scan_rows(&Diagonal(2), 1..3, &mut topk).unwrap_err();
        assert!(matches!(err, SelectError::OutOfBounds { row: 2, .. }));
    }

    #[test]
    fn picks_the_diagonal_peaks() {
        let result = BoundedHeapScan.select(&Diagonal(5), 3).unwrap();
        assert_eq!(result.values(), vec![5, 4, 3]);
    }
}
