use std::collections::BinaryHeap;

use gt_core::{CellValue, Coordinate, ScoredCoordinate, TopKResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Fewer than `capacity` entries; every offer is accepted.
    Building,
    /// At capacity; offers replace the weakest entry or are rejected.
    Full,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfferStats {
    pub accepted: u64,
    pub rejected: u64,
}

impl OfferStats {
    pub fn offered(&self) -> u64 {
        self.accepted + self.rejected
    }
}

/// Keeps the `capacity` best entries seen so far.
///
/// The heap is a max-heap under the canonical order, whose "greatest" entry
/// is the one ranking last, so the weakest retained entry sits on top.
#[derive(Debug, Clone)]
pub struct BoundedTopK<T: CellValue> {
    capacity: usize,
    heap: BinaryHeap<ScoredCoordinate<T>>,
    stats: OfferStats,
}

impl<T: CellValue> BoundedTopK<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
            stats: OfferStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn state(&self) -> BuildState {
        if self.heap.len() < self.capacity {
            BuildState::Building
        } else {
            BuildState::Full
        }
    }

    pub fn stats(&self) -> OfferStats {
        self.stats
    }

    /// The entry that the next accepted offer would evict once full.
    pub fn weakest(&self) -> Option<&ScoredCoordinate<T>> {
        self.heap.peek()
    }

    /// Returns whether the entry was retained.
    pub fn offer(&mut self, coord: Coordinate, value: T) -> bool {
        self.offer_scored(ScoredCoordinate::new(coord, value))
    }

    pub fn offer_scored(&mut self, candidate: ScoredCoordinate<T>) -> bool {
        if self.capacity == 0 {
            self.stats.rejected += 1;
            return false;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(candidate);
            self.stats.accepted += 1;
            return true;
        }
        // Compared against the live top every time; a replacement changes it.
        match self.heap.peek_mut() {
            Some(mut weakest) if candidate < *weakest => {
                *weakest = candidate;
                self.stats.accepted += 1;
                true
            }
            _ => {
                self.stats.rejected += 1;
                false
            }
        }
    }

    /// Consumes the structure, yielding entries in canonical order.
    pub fn drain(self) -> TopKResult<T> {
        TopKResult::from_canonical(self.heap.into_sorted_vec())
    }
}

impl<T: CellValue> Extend<ScoredCoordinate<T>> for BoundedTopK<T> {
    fn extend<I: IntoIterator<Item = ScoredCoordinate<T>>>(&mut self, iter: I) {
        for entry in iter {
            self.offer_scored(entry);
        }
    }
}
