//! Top-K selection strategies over a `GridView`.

use serde::{Deserialize, Serialize};

pub mod assemble;
pub mod bounded;
pub mod counting;
pub mod full_sort;
pub mod hash_bucket;
pub mod heap_scan;
pub mod ordered_set;
pub mod strategy;

pub use bounded::{BoundedTopK, BuildState, OfferStats};
pub use counting::CountingBucket;
pub use full_sort::FullSort;
pub use hash_bucket::HashBucket;
pub use heap_scan::BoundedHeapScan;
pub use ordered_set::OrderedSetScan;
pub use strategy::{select, SelectionStrategy, StrategyKind};

/// Default cap on the histogram CountingBucket may allocate.
pub const DEFAULT_COUNTING_DOMAIN_LIMIT: usize = 1 << 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectConfig {
    pub strategy: StrategyKind,
    /// Largest number of histogram buckets CountingBucket may allocate.
    pub counting_domain_limit: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::BoundedHeapScan,
            counting_domain_limit: DEFAULT_COUNTING_DOMAIN_LIMIT,
        }
    }
}
