//! Turning selection state into the canonical `TopKResult`.

use gt_core::{CellValue, GridView, Result, ScoredCoordinate, TopKResult};

/// Every cell of the grid in canonical order; the K >= size shortcut.
pub fn every_cell<G: GridView>(grid: &G) -> Result<TopKResult<G::Value>> {
    let mut cells = Vec::with_capacity(grid.size());
    for cell in grid.cursor() {
        cells.push(cell?);
    }
    cells.sort_unstable();
    Ok(TopKResult::from_canonical(cells))
}

/// Takes the first `k` entries of a bucket walk, then applies the canonical
/// order inside each value.
///
/// Buckets hand out equal values in insertion order, which only matches the
/// canonical order when cells were inserted row-major.
pub fn emit_buckets<T, I>(entries: I, k: usize) -> TopKResult<T>
where
    T: CellValue,
    I: IntoIterator<Item = ScoredCoordinate<T>>,
{
    let taken: Vec<_> = entries.into_iter().take(k).collect();
    TopKResult::canonicalize(taken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::Coordinate;

    #[test]
    fn emit_buckets_stops_at_k_and_sorts_within_values() {
        let walk = vec![
            ScoredCoordinate::at(3, 0, 9u8),
            ScoredCoordinate::at(1, 4, 9u8),
            ScoredCoordinate::at(0, 0, 2u8),
            ScoredCoordinate::at(0, 1, 1u8),
        ];
        let result = emit_buckets(walk, 3);
        assert_eq!(
            result.coordinates(),
            vec![Coordinate::new(1, 4), Coordinate::new(3, 0), Coordinate::new(0, 0)]
        );
    }
}
