//! Partition-then-merge top-K over a shared read-only grid.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use gt_core::{CellValue, GridView, Result, ScoredCoordinate, SelectError, TopKResult};
use gt_select::heap_scan::scan_rows;
use gt_select::{assemble, BoundedTopK, OfferStats};

use crate::metrics::MetricsRegistry;
use crate::start_workers;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParallelConfig {
    /// Worker count; `None` uses the available hardware parallelism.
    pub partitions: Option<usize>,
}

impl ParallelConfig {
    pub fn with_partitions(partitions: usize) -> Self {
        Self { partitions: Some(partitions) }
    }

    pub fn requested_partitions(&self) -> Result<usize> {
        match self.partitions {
            Some(0) => Err(SelectError::InvalidArgument(
                "partition count must be at least 1".to_string(),
            )),
            Some(p) => Ok(p),
            None => Ok(std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)),
        }
    }
}

/// Splits `0..rows` into `parts` contiguous ranges of `rows / parts` rows;
/// the last range also takes the remainder.
pub fn partition_rows(rows: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let per_part = rows / parts;
    (0..parts)
        .map(|i| {
            let start = i * per_part;
            let end = if i + 1 == parts { rows } else { start + per_part };
            start..end
        })
        .collect()
}

struct LocalTopK<T> {
    entries: Vec<ScoredCoordinate<T>>,
    stats: OfferStats,
    cells: u64,
}

/// Runs an independent bounded heap scan per row partition on its own
/// worker, then merges the local results on the calling thread.
///
/// Workers share nothing mutable: each owns its `BoundedTopK` and reads the
/// grid through `value_at` only.
pub struct ParallelPartitionedSelector {
    cfg: ParallelConfig,
    metrics: Option<MetricsRegistry>,
}

impl ParallelPartitionedSelector {
    pub fn new(cfg: ParallelConfig) -> Self {
        Self { cfg, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: MetricsRegistry) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Requested partitions clamped to `[1, rows]`.
    pub fn effective_partitions(&self, rows: usize) -> Result<usize> {
        Ok(self.cfg.requested_partitions()?.min(rows).max(1))
    }

    pub fn select<G>(&self, grid: Arc<G>, k: usize) -> Result<TopKResult<G::Value>>
    where
        G: GridView + Send + Sync + 'static,
    {
        let size = grid.size();
        if k == 0 || size == 0 {
            return Ok(TopKResult::empty());
        }
        if k >= size {
            return assemble::every_cell(grid.as_ref());
        }

        let parts = self.effective_partitions(grid.rows())?;
        let ranges = Arc::new(partition_rows(grid.rows(), parts));
        let cols = grid.cols();
        info!(%parts, rows = grid.rows(), cols, k, "parallel selection");

        let worker_grid = Arc::clone(&grid);
        let worker_ranges = Arc::clone(&ranges);
        let outcomes = start_workers(parts, move |index| -> Result<LocalTopK<G::Value>> {
            let rows = worker_ranges[index].clone();
            let mut local = BoundedTopK::new(k);
            scan_rows(worker_grid.as_ref(), rows.clone(), &mut local)?;
            debug!(partition = index, ?rows, kept = local.len(), "partition scanned");
            Ok(LocalTopK {
                stats: local.stats(),
                cells: (rows.len() * cols) as u64,
                entries: local.drain().into_vec(),
            })
        })?;

        // Every worker has joined; report the lowest failing partition.
        let mut locals = Vec::with_capacity(parts);
        for (partition, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(Ok(local)) => locals.push(local),
                Ok(Err(source)) => {
                    return Err(SelectError::WorkerFailure { partition, source: Box::new(source) })
                }
                Err(message) => return Err(SelectError::WorkerPanicked { partition, message }),
            }
        }

        Ok(self.merge(locals, k))
    }

    fn merge<T: CellValue>(&self, locals: Vec<LocalTopK<T>>, k: usize) -> TopKResult<T> {
        let partitions = locals.len() as u64;
        let mut global = BoundedTopK::new(k);
        let mut cells = 0;
        let mut candidates = 0;
        let mut local_stats = OfferStats::default();
        for local in locals {
            cells += local.cells;
            candidates += local.entries.len() as u64;
            local_stats.accepted += local.stats.accepted;
            local_stats.rejected += local.stats.rejected;
            global.extend(local.entries);
        }

        if let Some(metrics) = &self.metrics {
            metrics.inc_selections(1);
            metrics.inc_cells_scanned(cells);
            metrics.inc_partitions_run(partitions);
            metrics.inc_merge_candidates(candidates);
            metrics.record_offers(local_stats);
            metrics.record_offers(global.stats());
        }
        global.drain()
    }
}
