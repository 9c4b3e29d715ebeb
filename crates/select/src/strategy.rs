use serde::{Deserialize, Serialize};

use gt_core::{GridView, Result, TopKResult};

use crate::{
    assemble, BoundedHeapScan, CountingBucket, FullSort, HashBucket, OrderedSetScan, SelectConfig,
};

/// One algorithm for picking the K best cells of a grid.
///
/// `select` handles the cases every strategy shares; implementors only
/// provide `select_within`, which is called with `0 < k < grid.size()`.
pub trait SelectionStrategy {
    fn name(&self) -> &'static str;

    fn select_within<G: GridView>(&self, grid: &G, k: usize) -> Result<TopKResult<G::Value>>;

    fn select<G: GridView>(&self, grid: &G, k: usize) -> Result<TopKResult<G::Value>> {
        if k == 0 || grid.size() == 0 {
            return Ok(TopKResult::empty());
        }
        if k >= grid.size() {
            return assemble::every_cell(grid);
        }
        self.select_within(grid, k)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    FullSort,
    BoundedHeapScan,
    CountingBucket,
    HashBucket,
    OrderedSetScan,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::FullSort,
        StrategyKind::BoundedHeapScan,
        StrategyKind::CountingBucket,
        StrategyKind::HashBucket,
        StrategyKind::OrderedSetScan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::FullSort => FullSort.name(),
            StrategyKind::BoundedHeapScan => BoundedHeapScan.name(),
            StrategyKind::CountingBucket => CountingBucket::default().name(),
            StrategyKind::HashBucket => HashBucket.name(),
            StrategyKind::OrderedSetScan => OrderedSetScan.name(),
        }
    }

    pub fn select<G: GridView>(
        self,
        grid: &G,
        k: usize,
        cfg: &SelectConfig,
    ) -> Result<TopKResult<G::Value>> {
        match self {
            StrategyKind::FullSort => FullSort.select(grid, k),
            StrategyKind::BoundedHeapScan => BoundedHeapScan.select(grid, k),
            StrategyKind::CountingBucket => {
                CountingBucket::new(cfg.counting_domain_limit).select(grid, k)
            }
            StrategyKind::HashBucket => HashBucket.select(grid, k),
            StrategyKind::OrderedSetScan => OrderedSetScan.select(grid, k),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs the strategy named in `cfg`.
pub fn select<G: GridView>(grid: &G, k: usize, cfg: &SelectConfig) -> Result<TopKResult<G::Value>> {
    cfg.strategy.select(grid, k, cfg)
}
