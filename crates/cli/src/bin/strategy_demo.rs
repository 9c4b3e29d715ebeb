use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{info, warn};

use gt_grids::SyntheticGrid;
use gt_runtime::metrics::{MetricsRegistry, SelectionTimer};
use gt_runtime::{init_tracing, ParallelConfig, ParallelPartitionedSelector};
use gt_select::{FullSort, SelectConfig, SelectionStrategy, StrategyKind};

/// Runs every strategy on one synthetic grid and checks them against a full sort.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, default_value_t = 1_000)]
    rows: usize,
    #[arg(long, default_value_t = 1_000)]
    cols: usize,
    #[arg(long, default_value_t = 100)]
    k: usize,
    #[arg(long, default_value_t = 4_095)]
    max_value: u16,
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    info!(?args, "strategy_demo starting");

    let grid = Arc::new(
        SyntheticGrid::new(args.rows, args.cols, 0u16, args.max_value)
            .with_seed(args.seed)
            .dense()?,
    );

    let timer = SelectionTimer::start();
    let oracle = FullSort.select(grid.as_ref(), args.k)?;
    info!(elapsed = ?timer.elapsed(), "full sort oracle");

    let cfg = SelectConfig::default();
    let mut mismatches = 0;
    for kind in StrategyKind::ALL {
        let timer = SelectionTimer::start();
        let result = kind.select(grid.as_ref(), args.k, &cfg)?;
        let matches = result == oracle;
        info!(strategy = %kind, elapsed = ?timer.elapsed(), matches, "sequential");
        if !matches {
            warn!(strategy = %kind, "result differs from the full sort");
            mismatches += 1;
        }
    }

    for partitions in [1, 2, 4, 8] {
        let metrics = MetricsRegistry::default();
        let timer = SelectionTimer::start();
        let result = ParallelPartitionedSelector::new(ParallelConfig::with_partitions(partitions))
            .with_metrics(metrics.clone())
            .select(Arc::clone(&grid), args.k)?;
        let matches = result == oracle;
        info!(
            "{}",
            metrics
                .snapshot()
                .to_json_line(&format!("parallel_p{partitions}"), Some(timer.elapsed()))
        );
        if !matches {
            warn!(%partitions, "parallel result differs from the full sort");
            mismatches += 1;
        }
    }

    if mismatches > 0 {
        bail!("{mismatches} selections disagreed with the oracle");
    }
    if let Some(top) = oracle.iter().next() {
        info!(row = top.coord.row, col = top.coord.col, value = top.value, "top cell");
    }
    Ok(())
}
