use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use gt_select::OfferStats;

#[derive(Clone, Default)]
pub struct MetricsRegistry {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    selections: AtomicU64,
    cells_scanned: AtomicU64,
    offers_accepted: AtomicU64,
    offers_rejected: AtomicU64,
    partitions_run: AtomicU64,
    merge_candidates: AtomicU64,
}

impl MetricsRegistry {
    pub fn inc_selections(&self, delta: u64) {
        self.inner.selections.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_cells_scanned(&self, delta: u64) {
        self.inner.cells_scanned.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn record_offers(&self, stats: OfferStats) {
        self.inner.offers_accepted.fetch_add(stats.accepted, Ordering::Relaxed);
        self.inner.offers_rejected.fetch_add(stats.rejected, Ordering::Relaxed);
    }

    pub fn inc_partitions_run(&self, delta: u64) {
        self.inner.partitions_run.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_merge_candidates(&self, delta: u64) {
        self.inner.merge_candidates.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            selections: self.inner.selections.load(Ordering::Relaxed),
            cells_scanned: self.inner.cells_scanned.load(Ordering::Relaxed),
            offers_accepted: self.inner.offers_accepted.load(Ordering::Relaxed),
            offers_rejected: self.inner.offers_rejected.load(Ordering::Relaxed),
            partitions_run: self.inner.partitions_run.load(Ordering::Relaxed),
            merge_candidates: self.inner.merge_candidates.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub selections: u64,
    pub cells_scanned: u64,
    pub offers_accepted: u64,
    pub offers_rejected: u64,
    pub partitions_run: u64,
    pub merge_candidates: u64,
}

impl MetricsSnapshot {
    pub fn to_json_line(&self, label: &str, elapsed: Option<Duration>) -> String {
        #[derive(Serialize)]
        struct Snapshot<'a> {
            label: &'a str,
            #[serde(flatten)]
            counters: &'a MetricsSnapshot,
            elapsed_ms: Option<u128>,
        }

        let payload = Snapshot {
            label,
            counters: self,
            elapsed_ms: elapsed.map(|d| d.as_millis()),
        };
        serde_json::to_string(&payload).unwrap_or_else(|_| String::from("{}"))
    }
}

pub struct SelectionTimer {
    start: Instant,
}

impl SelectionTimer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
