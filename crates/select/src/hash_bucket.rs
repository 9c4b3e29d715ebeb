use std::collections::HashMap;

use gt_core::{CellValue, Coordinate, GridView, Result, ScoredCoordinate, TopKResult};

use crate::{assemble, SelectionStrategy};

/// Sparse map from observed value to its cells; distinct keys are sorted
/// descending and walked until K cells are collected.
///
/// O(N + D log D) time, O(N + D) space for D distinct values. Works for any
/// value type, including negatives and floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashBucket;

impl SelectionStrategy for HashBucket {
    fn name(&self) -> &'static str {
        "hash_bucket"
    }

    fn select_within<G: GridView>(&self, grid: &G, k: usize) -> Result<TopKResult<G::Value>> {
        let mut buckets: HashMap<u64, (G::Value, Vec<Coordinate>)> = HashMap::new();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let value = grid.value_at(row, col)?;
                buckets
                    .entry(value.hash_key())
                    .or_insert_with(|| (value, Vec::new()))
                    .1
                    .push(Coordinate::new(row, col));
            }
        }

        let mut keyed: Vec<_> = buckets.into_values().collect();
        keyed.sort_unstable_by(|a, b| b.0.rank_cmp(&a.0));

        let walk = keyed.into_iter().flat_map(|(value, coords)| {
            coords.into_iter().map(move |coord| ScoredCoordinate::new(coord, value))
        });
        Ok(assemble::emit_buckets(walk, k))
    }
}
