use gt_core::{CellValue, GridView, Result, ScoredCoordinate, SelectError, TopKResult};

use crate::{assemble, SelectionStrategy, DEFAULT_COUNTING_DOMAIN_LIMIT};

/// Dense histogram over `[0, max]`, walked from the top bucket down.
///
/// O(N + max) time and space. Only usable for non-negative integral values
/// whose maximum fits under `domain_limit` buckets; anything else is an
/// `UnsupportedDomain` error.
#[derive(Debug, Clone, Copy)]
pub struct CountingBucket {
    domain_limit: usize,
}

impl CountingBucket {
    pub fn new(domain_limit: usize) -> Self {
        Self { domain_limit }
    }

    fn slot<T: CellValue>(value: T) -> Result<usize> {
        value.bucket_index().ok_or_else(|| {
            SelectError::UnsupportedDomain(format!(
                "value {value} has no histogram slot (negative or non-integral)"
            ))
        })
    }
}

impl Default for CountingBucket {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTING_DOMAIN_LIMIT)
    }
}

impl SelectionStrategy for CountingBucket {
    fn name(&self) -> &'static str {
        "counting_bucket"
    }

    fn select_within<G: GridView>(&self, grid: &G, k: usize) -> Result<TopKResult<G::Value>> {
        let (rows, cols) = (grid.rows(), grid.cols());

        let mut max_slot = 0usize;
        for row in 0..rows {
            for col in 0..cols {
                max_slot = max_slot.max(Self::slot(grid.value_at(row, col)?)?);
            }
        }
        if max_slot >= self.domain_limit {
            return Err(SelectError::UnsupportedDomain(format!(
                "maximum value needs {} buckets, limit is {}",
                max_slot as u128 + 1,
                self.domain_limit
            )));
        }

        let mut buckets: Vec<Vec<ScoredCoordinate<G::Value>>> = vec![Vec::new(); max_slot + 1];
        for row in 0..rows {
            for col in 0..cols {
                let value = grid.value_at(row, col)?;
                buckets[Self::slot(value)?].push(ScoredCoordinate::at(row, col, value));
            }
        }

        let walk = buckets.into_iter().rev().flatten();
        Ok(assemble::emit_buckets(walk, k))
    }
}
