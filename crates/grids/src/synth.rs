//! Seeded random grids for tests, demos and `random:` identifiers.

use std::cmp::Ordering;

use rand::distributions::uniform::SampleUniform;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gt_core::{checked_size, CellValue, Result, SelectError};

use crate::{DecodeError, DenseGrid, GridSource, SparseGrid};

/// Recipe for a reproducible random grid with values drawn from `[low, high]`.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticGrid<T> {
    pub rows: usize,
    pub cols: usize,
    pub low: T,
    pub high: T,
    pub seed: u64,
}

impl<T> SyntheticGrid<T>
where
    T: CellValue + SampleUniform,
{
    pub fn new(rows: usize, cols: usize, low: T, high: T) -> Self {
        Self { rows, cols, low, high, seed: 0 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn distribution(&self) -> Result<Uniform<T>> {
        match self.low.partial_cmp(&self.high) {
            Some(Ordering::Less | Ordering::Equal) => Ok(Uniform::new_inclusive(self.low, self.high)),
            _ => Err(SelectError::InvalidArgument(format!(
                "empty value range [{}, {}]",
                self.low, self.high
            ))),
        }
    }

    /// Every cell drawn independently.
    pub fn dense(&self) -> Result<DenseGrid<T>> {
        let size = checked_size(self.rows, self.cols)?;
        let dist = self.distribution()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let cells = (0..size).map(|_| dist.sample(&mut rng)).collect();
        DenseGrid::new(self.rows, self.cols, cells)
    }

    /// `count` distinct positions get a random value; the rest stay `ZERO`.
    pub fn sparse(&self, count: usize) -> Result<SparseGrid<T>> {
        let size = checked_size(self.rows, self.cols)?;
        if count > size {
            return Err(SelectError::InvalidArgument(format!(
                "cannot place {count} unique cells in a {}x{} grid",
                self.rows, self.cols
            )));
        }
        let dist = self.distribution()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let positions = rand::seq::index::sample(&mut rng, size, count);
        let cells: Vec<_> = positions
            .into_iter()
            .map(|idx| (idx / self.cols, idx % self.cols, dist.sample(&mut rng)))
            .collect();
        SparseGrid::with_bounds(self.rows, self.cols, cells)
    }
}

impl<T> GridSource for SyntheticGrid<T>
where
    T: CellValue + SampleUniform,
{
    type Grid = DenseGrid<T>;

    fn load(&self) -> std::result::Result<DenseGrid<T>, DecodeError> {
        Ok(self.dense()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::GridView;

    #[test]
    fn same_seed_same_grid() {
        let a = SyntheticGrid::new(8, 9, 0u16, 1000).with_seed(7).dense().unwrap();
        let b = SyntheticGrid::new(8, 9, 0u16, 1000).with_seed(7).dense().unwrap();
        let c = SyntheticGrid::new(8, 9, 0u16, 1000).with_seed(8).dense().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_slice().iter().all(|v| *v <= 1000));
    }

    #[test]
    fn sparse_positions_are_unique() {
        let grid = SyntheticGrid::new(5, 5, 1u8, 255).with_seed(3).sparse(25).unwrap();
        assert_eq!(grid.explicit_len(), 25);
        assert_eq!((grid.rows(), grid.cols()), (5, 5));
    }

    #[test]
    fn rejects_impossible_requests() {
        assert!(SyntheticGrid::new(2, 2, 0u8, 9).sparse(5).is_err());
        assert!(SyntheticGrid::new(2, 2, 9u8, 0).dense().is_err());
        assert!(SyntheticGrid::new(2, 2, f32::NAN, 1.0).dense().is_err());
    }

    #[test]
    fn overflowing_extents_fail_before_allocating() {
        let huge = SyntheticGrid::new(usize::MAX / 2, 3, 0u16, 5);
        assert!(matches!(huge.dense(), Err(SelectError::InvalidArgument(_))));
        assert!(matches!(huge.sparse(1), Err(SelectError::InvalidArgument(_))));
    }
}
