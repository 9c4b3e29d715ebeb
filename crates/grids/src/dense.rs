use serde::{Deserialize, Serialize};

use gt_core::{check_bounds, checked_size, CellValue, GridView, Result, SelectError};

/// Row-major grid backed by one contiguous buffer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DenseGrid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: CellValue> DenseGrid<T> {
    pub fn new(rows: usize, cols: usize, cells: Vec<T>) -> Result<Self> {
        let expected = checked_size(rows, cols)?;
        if cells.len() != expected {
            return Err(SelectError::InvalidArgument(format!(
                "{rows}x{cols} grid needs {expected} cells, got {}",
                cells.len()
            )));
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self> {
        let size = checked_size(rows, cols)?;
        Ok(Self { rows, cols, cells: vec![value; size] })
    }

    /// Builds from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|r| r.len() != width) {
            return Err(SelectError::InvalidArgument(format!(
                "row {bad} has {} cells, expected {width}",
                rows[bad].len()
            )));
        }
        Self::new(height, width, rows.into_iter().flatten().collect())
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        check_bounds(row, col, self.rows, self.cols)?;
        self.cells[row * self.cols + col] = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

impl<T: CellValue> GridView for DenseGrid<T> {
    type Value = T;

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn value_at(&self, row: usize, col: usize) -> Result<T> {
        check_bounds(row, col, self.rows, self.cols)?;
        Ok(self.cells[row * self.cols + col])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_must_match_cell_count() {
        assert!(DenseGrid::new(2, 3, vec![0u8; 6]).is_ok());
        assert!(matches!(
            DenseGrid::new(2, 3, vec![0u8; 5]),
            Err(SelectError::InvalidArgument(_))
        ));
    }

    #[test]
    fn from_rows_is_row_major() {
        let grid = DenseGrid::from_rows(vec![vec![1u16, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.value_at(1, 0).unwrap(), 4);
        assert!(DenseGrid::from_rows(vec![vec![1u16, 2], vec![3]]).is_err());
    }

    #[test]
    fn set_and_read_back() {
        let mut grid = DenseGrid::filled(3, 3, 0i32).unwrap();
        grid.set(2, 1, -7).unwrap();
        assert_eq!(grid.value_at(2, 1).unwrap(), -7);
        assert!(grid.set(3, 0, 1).is_err());
    }

    #[test]
    fn overflowing_extents_are_invalid() {
        assert!(matches!(
            DenseGrid::filled(usize::MAX, 2, 0u8),
            Err(SelectError::InvalidArgument(_))
        ));
        assert!(DenseGrid::<u8>::new(usize::MAX / 2, 3, Vec::new()).is_err());
    }
}
