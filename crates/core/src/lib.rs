//! Core types and traits for gridtop.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod grid;
pub mod value;

pub use grid::{check_bounds, checked_size, GridCursor, GridView};
pub use value::CellValue;

pub type Result<T> = std::result::Result<T, SelectError>;

/// A `(row, col)` position inside a grid, 0-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A coordinate together with the value read from it.
///
/// `Ord` is the canonical tie-break order: higher values first, then lower
/// rows, then lower columns. "Less" means "ranks first", so an ascending sort
/// yields the canonical top-K sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoredCoordinate<T> {
    pub coord: Coordinate,
    pub value: T,
}

impl<T: CellValue> ScoredCoordinate<T> {
    pub fn new(coord: Coordinate, value: T) -> Self {
        Self { coord, value }
    }

    pub fn at(row: usize, col: usize, value: T) -> Self {
        Self::new(Coordinate::new(row, col), value)
    }
}

/// Canonical total order: value descending, row ascending, col ascending.
pub fn tie_break_order<T: CellValue>(a: &ScoredCoordinate<T>, b: &ScoredCoordinate<T>) -> Ordering {
    b.value
        .rank_cmp(&a.value)
        .then_with(|| a.coord.row.cmp(&b.coord.row))
        .then_with(|| a.coord.col.cmp(&b.coord.col))
}

impl<T: CellValue> PartialEq for ScoredCoordinate<T> {
    fn eq(&self, other: &Self) -> bool {
        tie_break_order(self, other) == Ordering::Equal
    }
}

impl<T: CellValue> Eq for ScoredCoordinate<T> {}

impl<T: CellValue> PartialOrd for ScoredCoordinate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: CellValue> Ord for ScoredCoordinate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        tie_break_order(self, other)
    }
}

/// Ordered top-K output: canonical order, no duplicate coordinates.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TopKResult<T: CellValue> {
    entries: Vec<ScoredCoordinate<T>>,
}

impl<T: CellValue> TopKResult<T> {
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Sorts `entries` into canonical order and drops repeated coordinates,
    /// keeping the highest-ranked occurrence of each.
    pub fn canonicalize(mut entries: Vec<ScoredCoordinate<T>>) -> Self {
        entries.sort_unstable();
        let mut seen = std::collections::HashSet::with_capacity(entries.len());
        entries.retain(|entry| seen.insert(entry.coord));
        Self { entries }
    }

    /// Wraps entries that are already canonical.
    pub fn from_canonical(entries: Vec<ScoredCoordinate<T>>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0] < w[1]));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCoordinate<T>> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ScoredCoordinate<T>] {
        &self.entries
    }

    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.entries.iter().map(|e| e.coord).collect()
    }

    pub fn values(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.value).collect()
    }

    pub fn into_vec(self) -> Vec<ScoredCoordinate<T>> {
        self.entries
    }
}

impl<T: CellValue> IntoIterator for TopKResult<T> {
    type Item = ScoredCoordinate<T>;
    type IntoIter = std::vec::IntoIter<ScoredCoordinate<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T: CellValue> IntoIterator for &'a TopKResult<T> {
    type Item = &'a ScoredCoordinate<T>;
    type IntoIter = std::slice::Iter<'a, ScoredCoordinate<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SelectError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("unsupported value domain: {0}")]
    UnsupportedDomain(String),
    #[error("cursor exhausted after {position} cells")]
    EndOfSequence { position: usize },
    #[error("partition {partition} failed: {source}")]
    WorkerFailure {
        partition: usize,
        #[source]
        source: Box<SelectError>,
    },
    #[error("partition {partition} panicked: {message}")]
    WorkerPanicked { partition: usize, message: String },
    #[error("worker pool error: {0}")]
    Runtime(String),
}

/// Converts a caller-supplied K into a selection size; negative K is rejected.
pub fn validate_k(k: i64) -> Result<usize> {
    usize::try_from(k).map_err(|_| SelectError::InvalidArgument(format!("K must be >= 0, got {k}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_break_prefers_higher_value_then_lower_row_then_lower_col() {
        let a = ScoredCoordinate::at(4, 6, 9u16);
        let b = ScoredCoordinate::at(6, 5, 9u16);
        let c = ScoredCoordinate::at(0, 0, 3u16);
        let d = ScoredCoordinate::at(4, 2, 9u16);

        let mut all = vec![c, b, a, d];
        all.sort();
        assert_eq!(all, vec![d, a, b, c]);
    }

    #[test]
    fn canonicalize_sorts_and_drops_repeated_coordinates() {
        let result = TopKResult::canonicalize(vec![
            ScoredCoordinate::at(1, 1, 5u8),
            ScoredCoordinate::at(0, 0, 7u8),
            ScoredCoordinate::at(1, 1, 5u8),
        ]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.coordinates(), vec![Coordinate::new(0, 0), Coordinate::new(1, 1)]);
        assert_eq!(result.values(), vec![7, 5]);
    }

    #[test]
    fn negative_k_is_invalid_but_zero_is_fine() {
        assert_eq!(validate_k(0).unwrap(), 0);
        assert_eq!(validate_k(12).unwrap(), 12);
        assert!(matches!(validate_k(-1), Err(SelectError::InvalidArgument(_))));
    }

    #[test]
    fn worker_failure_keeps_its_source() {
        let err = SelectError::WorkerFailure {
            partition: 2,
            source: Box::new(SelectError::OutOfBounds { row: 9, col: 0, rows: 4, cols: 4 }),
        };
        assert_eq!(
            err.to_string(),
            "partition 2 failed: cell (9, 0) is outside a 4x4 grid"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
