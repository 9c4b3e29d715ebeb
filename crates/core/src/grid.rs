//! The read-only grid interface consumed by every selection strategy.

use crate::{CellValue, Coordinate, Result, ScoredCoordinate, SelectError};

/// Read-only access to a rectangular grid of cell values.
///
/// Dimensions must stay stable for the duration of a selection call.
/// Implementations that are `Sync` can be scanned by several workers at once
/// through `value_at`.
pub trait GridView {
    type Value: CellValue;

    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Saturates rather than wrapping; grids built through `checked_size`
    /// never get near the limit.
    fn size(&self) -> usize {
        self.rows().saturating_mul(self.cols())
    }

    /// Fails with `OutOfBounds` outside `[0, rows) x [0, cols)`.
    fn value_at(&self, row: usize, col: usize) -> Result<Self::Value>;

    /// A fresh row-major cursor owned by the caller.
    fn cursor(&self) -> GridCursor<'_, Self>
    where
        Self: Sized,
    {
        GridCursor::new(self)
    }
}

impl<G: GridView + ?Sized> GridView for &G {
    type Value = G::Value;

    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn value_at(&self, row: usize, col: usize) -> Result<Self::Value> {
        (**self).value_at(row, col)
    }
}

pub fn check_bounds(row: usize, col: usize, rows: usize, cols: usize) -> Result<()> {
    if row >= rows || col >= cols {
        return Err(SelectError::OutOfBounds { row, col, rows, cols });
    }
    Ok(())
}

/// `rows * cols`, or `InvalidArgument` when the cell count overflows `usize`.
pub fn checked_size(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or_else(|| SelectError::InvalidArgument(format!("{rows}x{cols} grid overflows usize")))
}

/// Forward row-major walk over a grid.
///
/// The position lives in the cursor, never in the grid, so every worker that
/// wants sequential access builds its own.
pub struct GridCursor<'a, G: GridView> {
    grid: &'a G,
    position: usize,
}

impl<'a, G: GridView> GridCursor<'a, G> {
    pub fn new(grid: &'a G) -> Self {
        Self { grid, position: 0 }
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Coordinate the next call to `next_value` will read.
    pub fn peek_coordinate(&self) -> Option<Coordinate> {
        let cols = self.grid.cols();
        if cols == 0 || self.position >= self.grid.size() {
            return None;
        }
        Some(Coordinate::new(self.position / cols, self.position % cols))
    }

    /// Returns the next cell value; fails with `EndOfSequence` once exhausted.
    pub fn next_value(&mut self) -> Result<G::Value> {
        self.next_scored().map(|cell| cell.value)
    }

    pub fn next_scored(&mut self) -> Result<ScoredCoordinate<G::Value>> {
        let coord = self
            .peek_coordinate()
            .ok_or(SelectError::EndOfSequence { position: self.position })?;
        let value = self.grid.value_at(coord.row, coord.col)?;
        self.position += 1;
        Ok(ScoredCoordinate::new(coord, value))
    }
}

impl<'a, G: GridView> Iterator for GridCursor<'a, G> {
    type Item = Result<ScoredCoordinate<G::Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.peek_coordinate()?;
        Some(self.next_scored())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.size().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp {
        rows: usize,
        cols: usize,
    }

    impl GridView for Ramp {
        type Value = u32;

        fn rows(&self) -> usize {
            self.rows
        }

        fn cols(&self) -> usize {
            self.cols
        }

        fn value_at(&self, row: usize, col: usize) -> Result<u32> {
            check_bounds(row, col, self.rows, self.cols)?;
            Ok((row * self.cols + col) as u32)
        }
    }

    #[test]
    fn cursor_walks_row_major_then_reports_end() {
        let grid = Ramp { rows: 2, cols: 3 };
        let mut cursor = grid.cursor();
        let seen: Vec<u32> = (0..6).map(|_| cursor.next_value().unwrap()).collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
        assert!(matches!(
            cursor.next_value(),
            Err(SelectError::EndOfSequence { position: 6 })
        ));

        cursor.reset();
        assert_eq!(cursor.next_value().unwrap(), 0);
    }

    #[test]
    fn cursor_iterator_yields_coordinates() {
        let grid = Ramp { rows: 2, cols: 2 };
        let cells: Vec<_> = grid.cursor().collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[3].coord, Coordinate::new(1, 1));
        assert_eq!(cells[3].value, 3);
    }

    #[test]
    fn empty_grid_cursor_is_exhausted_immediately() {
        let grid = Ramp { rows: 0, cols: 5 };
        let mut cursor = grid.cursor();
        assert!(cursor.next().is_none());
        assert!(matches!(
            cursor.next_value(),
            Err(SelectError::EndOfSequence { position: 0 })
        ));
    }

    #[test]
    fn out_of_bounds_reports_extent() {
        let grid = Ramp { rows: 2, cols: 2 };
        assert!(matches!(
            grid.value_at(2, 0),
            Err(SelectError::OutOfBounds { row: 2, col: 0, rows: 2, cols: 2 })
        ));
        assert!(grid.value_at(1, 2).is_err());
    }

    #[test]
    fn oversized_extents_are_rejected_not_wrapped() {
        assert_eq!(checked_size(3, 4).unwrap(), 12);
        assert!(matches!(
            checked_size(usize::MAX, 2),
            Err(SelectError::InvalidArgument(_))
        ));
        let huge = Ramp { rows: usize::MAX, cols: 2 };
        assert_eq!(huge.size(), usize::MAX);
    }
}
