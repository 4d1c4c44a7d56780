use std::cmp::Ordering;

use hashbrown::HashSet;
use strata_world::ChunkCoord;

/// Deduplicating set of chunks waiting for a rebuild, popped nearest first.
#[derive(Debug, Default)]
pub struct RebuildQueue {
    pending: HashSet<ChunkCoord>,
}

impl RebuildQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `coord` was already queued.
    #[inline]
    pub fn push(&mut self, coord: ChunkCoord) -> bool {
        self.pending.insert(coord)
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.pending.contains(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes `coord`; returns whether it was queued.
    #[inline]
    pub fn remove(&mut self, coord: ChunkCoord) -> bool {
        self.pending.remove(&coord)
    }

    /// Removes and returns the queued chunk whose center is closest to the horizontal
    /// position `(x, z)`. Ties go to the smaller coordinate.
    pub fn pop_nearest(&mut self, x: f32, z: f32) -> Option<ChunkCoord> {
        let best = self.pending.iter().copied().min_by(|a, b| {
            a.center_distance_sq(x, z)
                .partial_cmp(&b.center_distance_sq(x, z))
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(b))
        })?;
        self.pending.remove(&best);
        Some(best)
    }
}
