use std::collections::HashMap;

use gt_core::{check_bounds, checked_size, CellValue, Coordinate, GridView, Result, SelectError};

/// A few explicit cells over an implicit `ZERO` background.
///
/// Handy for tests and for inputs where almost every cell is empty. When
/// bounds are not given they are inferred as the largest explicit row and
/// column plus one. If a coordinate is listed twice the first value wins.
#[derive(Debug, Clone)]
pub struct SparseGrid<T> {
    rows: usize,
    cols: usize,
    cells: HashMap<Coordinate, T>,
}

impl<T: CellValue> SparseGrid<T> {
    /// Bounds inferred from the explicit cells.
    pub fn from_cells<I>(cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        Self::with_optional_bounds(None, None, cells.into_iter().collect())
    }

    /// Fixed bounds; explicit cells outside them are rejected.
    pub fn with_bounds<I>(rows: usize, cols: usize, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        checked_size(rows, cols)?;
        let mut map = HashMap::new();
        for (row, col, value) in cells {
            check_bounds(row, col, rows, cols)?;
            map.entry(Coordinate::new(row, col)).or_insert(value);
        }
        Ok(Self { rows, cols, cells: map })
    }

    /// Bounds that are `None` are inferred from the explicit cells.
    pub fn with_optional_bounds(
        rows: Option<usize>,
        cols: Option<usize>,
        cells: Vec<(usize, usize, T)>,
    ) -> Result<Self> {
        let rows = match rows {
            Some(rows) => rows,
            None => extent("row", cells.iter().map(|c| c.0))?,
        };
        let cols = match cols {
            Some(cols) => cols,
            None => extent("col", cells.iter().map(|c| c.1))?,
        };
        Self::with_bounds(rows, cols, cells)
    }

    /// Number of explicitly stored cells.
    pub fn explicit_len(&self) -> usize {
        self.cells.len()
    }
}

/// One past the largest index, or `InvalidArgument` if that is not representable.
fn extent(axis: &str, indices: impl Iterator<Item = usize>) -> Result<usize> {
    let mut end = 0;
    for index in indices {
        let next = index.checked_add(1).ok_or_else(|| {
            SelectError::InvalidArgument(format!("{axis} {index} leaves no room for a bound"))
        })?;
        end = end.max(next);
    }
    Ok(end)
}

impl<T: CellValue> GridView for SparseGrid<T> {
    type Value = T;

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn value_at(&self, row: usize, col: usize) -> Result<T> {
        check_bounds(row, col, self.rows, self.cols)?;
        Ok(self
            .cells
            .get(&Coordinate::new(row, col))
            .copied()
            .unwrap_or(T::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_bounds_from_explicit_cells() {
        let grid = SparseGrid::from_cells(vec![(1, 1, 255u16), (5, 6, 777), (3, 3, 150)]).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (6, 7));
        assert_eq!(grid.size(), 42);
        assert_eq!(grid.value_at(5, 6).unwrap(), 777);
        assert_eq!(grid.value_at(0, 6).unwrap(), 0);
        assert!(grid.value_at(6, 0).is_err());
    }

    #[test]
    fn empty_cell_list_is_an_empty_grid() {
        let grid = SparseGrid::<u16>::from_cells(Vec::new()).unwrap();
        assert_eq!(grid.size(), 0);
    }

    #[test]
    fn first_duplicate_wins() {
        let grid = SparseGrid::from_cells(vec![(0, 0, 4u8), (0, 0, 9)]).unwrap();
        assert_eq!(grid.value_at(0, 0).unwrap(), 4);
        assert_eq!(grid.explicit_len(), 1);
    }

    #[test]
    fn bounded_grid_rejects_outside_cells() {
        assert!(SparseGrid::with_bounds(2, 2, vec![(2, 0, 1u8)]).is_err());
        let grid = SparseGrid::with_optional_bounds(Some(10), None, vec![(1, 3, 2u8)]).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (10, 4));
    }

    #[test]
    fn extreme_indices_are_errors_not_panics() {
        let far = vec![(usize::MAX, 0, 1u8)];
        assert!(matches!(
            SparseGrid::from_cells(far.clone()),
            Err(SelectError::InvalidArgument(_))
        ));
        assert!(matches!(
            SparseGrid::with_optional_bounds(Some(4), Some(4), far),
            Err(SelectError::OutOfBounds { row: usize::MAX, .. })
        ));
        assert!(matches!(
            SparseGrid::<u8>::with_bounds(usize::MAX, 2, Vec::new()),
            Err(SelectError::InvalidArgument(_))
        ));
    }
}
