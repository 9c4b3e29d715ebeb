use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use gt_core::{validate_k, GridView};
use gt_grids::{GridId, JsonFileSink, ResultSink, StdoutSink};
use gt_runtime::metrics::{MetricsRegistry, SelectionTimer};
use gt_runtime::{init_tracing, ParallelPartitionedSelector, RunConfig};
use gt_select::{select, StrategyKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Engine {
    Sort,
    Heap,
    Counting,
    Hash,
    OrderedSet,
    Parallel,
}

impl Engine {
    fn sequential(self) -> Option<StrategyKind> {
        match self {
            Engine::Sort => Some(StrategyKind::FullSort),
            Engine::Heap => Some(StrategyKind::BoundedHeapScan),
            Engine::Counting => Some(StrategyKind::CountingBucket),
            Engine::Hash => Some(StrategyKind::HashBucket),
            Engine::OrderedSet => Some(StrategyKind::OrderedSetScan),
            Engine::Parallel => None,
        }
    }
}

/// Find the K highest-valued cells of a grid.
#[derive(Debug, Parser)]
#[command(name = "gridtop", version)]
struct Args {
    /// JSON grid file, or random:<rows>x<cols>[:<seed>]
    grid: String,

    /// Number of cells to select
    #[arg(allow_negative_numbers = true)]
    k: i64,

    /// Selection engine; defaults to the strategy in the config
    #[arg(long, value_enum)]
    strategy: Option<Engine>,

    /// Worker count for the parallel engine
    #[arg(long)]
    partitions: Option<usize>,

    /// Write the JSON report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Largest value drawn for random grids
    #[arg(long, default_value_t = u16::MAX)]
    random_max: u16,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("gridtop failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut cfg = match &args.config {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(partitions) = args.partitions {
        cfg.parallel.partitions = Some(partitions);
    }

    let k = validate_k(args.k)?;
    let id = GridId::parse(&args.grid)?;
    let grid = Arc::new(
        id.open(args.random_max)
            .with_context(|| format!("loading grid {}", args.grid))?,
    );
    info!(grid = %args.grid, rows = grid.rows(), cols = grid.cols(), k, "grid loaded");

    let metrics = MetricsRegistry::default();
    let timer = SelectionTimer::start();
    let sequential = match args.strategy {
        Some(engine) => engine.sequential(),
        None => Some(cfg.select.strategy),
    };
    let result = match sequential {
        Some(strategy) => {
            cfg.select.strategy = strategy;
            let result = select(grid.as_ref(), k, &cfg.select)
                .with_context(|| format!("{strategy} selection"))?;
            metrics.inc_selections(1);
            metrics.inc_cells_scanned(grid.size() as u64);
            result
        }
        None => ParallelPartitionedSelector::new(cfg.parallel.clone())
            .with_metrics(metrics.clone())
            .select(Arc::clone(&grid), k)
            .context("parallel selection")?,
    };
    info!(
        "{}",
        metrics.snapshot().to_json_line("gridtop", Some(timer.elapsed()))
    );

    match &args.output {
        Some(path) => {
            JsonFileSink::new(path)
                .emit(grid.as_ref(), &result)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), count = result.len(), "report written");
        }
        None => StdoutSink.emit(grid.as_ref(), &result)?,
    }
    Ok(())
}
