use std::sync::Arc;

use gt_core::{check_bounds, Coordinate, GridView, Result, SelectError};
use gt_grids::{DenseGrid, SparseGrid, SyntheticGrid};
use gt_runtime::metrics::MetricsRegistry;
use gt_runtime::{partition_rows, ParallelConfig, ParallelPartitionedSelector};
use gt_select::{BoundedHeapScan, FullSort, SelectionStrategy};

fn selector(partitions: usize) -> ParallelPartitionedSelector {
    ParallelPartitionedSelector::new(ParallelConfig::with_partitions(partitions))
}

#[test]
fn partitions_cover_rows_with_remainder_in_last() {
    assert_eq!(partition_rows(10, 3), vec![0..3, 3..6, 6..10]);
    assert_eq!(partition_rows(2, 4), vec![0..0, 0..0, 0..0, 0..2]);
    assert_eq!(partition_rows(7, 1), vec![0..7]);
    assert_eq!(partition_rows(0, 0), vec![0..0]);
}

#[test]
fn result_is_independent_of_partition_count() {
    let grid = Arc::new(
        SyntheticGrid::new(37, 23, 0u16, 300)
            .with_seed(11)
            .dense()
            .unwrap(),
    );
    for k in [1, 5, 64, 300] {
        let sequential = BoundedHeapScan.select(grid.as_ref(), k).unwrap();
        for p in [1, 2, 4, 8] {
            let parallel = selector(p).select(Arc::clone(&grid), k).unwrap();
            assert_eq!(parallel, sequential, "k={k} p={p}");
        }
    }
}

#[test]
fn more_partitions_than_rows_still_matches_oracle() {
    let grid = Arc::new(SyntheticGrid::new(3, 50, 0u8, 9).with_seed(2).dense().unwrap());
    let oracle = FullSort.select(grid.as_ref(), 20).unwrap();
    let parallel = selector(8).select(Arc::clone(&grid), 20).unwrap();
    assert_eq!(parallel, oracle);
    assert_eq!(selector(8).effective_partitions(3).unwrap(), 3);
}

#[test]
fn shortcuts_do_not_need_workers() {
    let grid = Arc::new(DenseGrid::from_rows(vec![vec![3u32, 1], vec![2, 9]]).unwrap());
    assert!(selector(4).select(Arc::clone(&grid), 0).unwrap().is_empty());

    let all = selector(4).select(Arc::clone(&grid), 10).unwrap();
    assert_eq!(all.values(), vec![9, 3, 2, 1]);

    let empty = Arc::new(SparseGrid::<u16>::from_cells(Vec::new()).unwrap());
    assert!(selector(2).select(empty, 3).unwrap().is_empty());
}

#[test]
fn zero_partitions_is_invalid() {
    let grid = Arc::new(DenseGrid::filled(4, 4, 1u8).unwrap());
    assert!(matches!(
        selector(0).select(grid, 2),
        Err(SelectError::InvalidArgument(_))
    ));
}

#[test]
fn tie_break_matches_sequential() {
    let grid = Arc::new(SparseGrid::from_cells(vec![(6, 5, 900u16), (4, 6, 900), (1, 1, 3)]).unwrap());
    for p in [1, 2, 4] {
        let result = selector(p).select(Arc::clone(&grid), 1).unwrap();
        assert_eq!(result.coordinates(), vec![Coordinate::new(4, 6)]);
    }
}

/// Claims more rows than its backing grid holds.
struct Truncated {
    claimed_rows: usize,
    inner: DenseGrid<u16>,
}

impl GridView for Truncated {
    type Value = u16;

    fn rows(&self) -> usize {
        self.claimed_rows
    }

    fn cols(&self) -> usize {
        self.inner.cols()
    }

    fn value_at(&self, row: usize, col: usize) -> Result<u16> {
        self.inner.value_at(row, col)
    }
}

#[test]
fn worker_error_surfaces_after_join() {
    let grid = Arc::new(Truncated {
        claimed_rows: 8,
        inner: DenseGrid::filled(6, 4, 5).unwrap(),
    });
    let err = selector(4).select(grid, 3).unwrap_err();
    match err {
        SelectError::WorkerFailure { partition, source } => {
            assert_eq!(partition, 3);
            assert!(matches!(*source, SelectError::OutOfBounds { row: 6, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

struct Explosive;

impl GridView for Explosive {
    type Value = u8;

    fn rows(&self) -> usize {
        4
    }

    fn cols(&self) -> usize {
        4
    }

    fn value_at(&self, row: usize, col: usize) -> Result<u8> {
        check_bounds(row, col, 4, 4)?;
        if row == 1 {
            panic!("sensor fault on row {row}");
        }
        Ok(1)
    }
}

#[test]
fn worker_panic_is_reported_not_lost() {
    let err = selector(2).select(Arc::new(Explosive), 2).unwrap_err();
    match &err {
        SelectError::WorkerPanicked { partition, message } => {
            assert_eq!(*partition, 0);
            assert!(message.contains("sensor fault on row 1"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("sensor fault"));
}

#[test]
fn metrics_count_partitions_and_cells() {
    let metrics = MetricsRegistry::default();
    let grid = Arc::new(SyntheticGrid::new(16, 8, 0u16, 50).with_seed(5).dense().unwrap());
    ParallelPartitionedSelector::new(ParallelConfig::with_partitions(4))
        .with_metrics(metrics.clone())
        .select(grid, 10)
        .unwrap();

    let snap = metrics.snapshot();
    assert_eq!(snap.selections, 1);
    assert_eq!(snap.partitions_run, 4);
    assert_eq!(snap.cells_scanned, 128);
    assert_eq!(snap.merge_candidates, 40);
    assert_eq!(snap.offers_accepted + snap.offers_rejected, 128 + 40);
}
