//! Runtime bootstrap: tracing, the timely worker pool and the parallel selector.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, Level};

use gt_core::SelectError;
use gt_select::SelectConfig;

pub mod metrics;
pub mod parallel;

pub use parallel::{partition_rows, ParallelConfig, ParallelPartitionedSelector};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs `f(index)` once on each of `workers` timely worker threads and
/// blocks until every one has finished.
///
/// Outcomes come back in worker-index order. A worker that panicked
/// contributes `Err` carrying its panic message.
pub fn start_workers<T, F>(
    workers: usize,
    f: F,
) -> std::result::Result<Vec<std::result::Result<T, String>>, SelectError>
where
    T: Send + 'static,
    F: Fn(usize) -> T + Send + Sync + 'static,
{
    debug!(%workers, "starting timely workers");
    let guards = timely::execute(timely::Config::process(workers), move |worker| {
        let index = worker.index();
        panic::catch_unwind(AssertUnwindSafe(|| f(index))).map_err(panic_message)
    })
    .map_err(SelectError::Runtime)?;
    Ok(guards.join().into_iter().map(|joined| joined.and_then(|outcome| outcome)).collect())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast_ref::<&'static str>() {
            Some(message) => (*message).to_string(),
            None => "worker panicked with a non-string payload".to_string(),
        },
    }
}

/// Everything a run can be configured with; loadable from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub select: SelectConfig,
    pub parallel: ParallelConfig,
}

impl RunConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
