use hashbrown::HashMap;
use strata_blocks::BlockId;
use strata_world::{ChunkCoord, WorldPos};

use crate::buf::ChunkBuf;

#[derive(Debug)]
struct Slot {
    buf: ChunkBuf,
    generated: bool,
}

/// Chunk storage keyed by coordinate.
///
/// Storage can exist before a chunk is generated: trees spilling over a chunk edge write
/// into a neighbor's storage ahead of its own generation pass. Only generated chunks are
/// visible through the read accessors.
#[derive(Debug, Default)]
pub struct VoxelGrid {
    chunks: HashMap<ChunkCoord, Slot>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_generated(&self, coord: ChunkCoord) -> bool {
        self.chunks.get(&coord).is_some_and(|s| s.generated)
    }

    /// Generated chunk data.
    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        self.chunks
            .get(&coord)
            .filter(|s| s.generated)
            .map(|s| &s.buf)
    }

    /// Block of a generated chunk; `None` when the chunk is not generated or `y` is out of
    /// range.
    #[inline]
    pub fn block(&self, pos: WorldPos) -> Option<BlockId> {
        let (coord, local) = pos.split()?;
        self.get(coord).map(|buf| buf.get(local))
    }

    /// Mutable storage for `coord`, allocating an all-air chunk if none exists. Does not
    /// change the generated mark.
    pub fn storage_mut(&mut self, coord: ChunkCoord) -> &mut ChunkBuf {
        &mut self
            .chunks
            .entry(coord)
            .or_insert_with(|| Slot {
                buf: ChunkBuf::empty(coord),
                generated: false,
            })
            .buf
    }

    pub fn mark_generated(&mut self, coord: ChunkCoord) {
        self.chunks
            .entry(coord)
            .or_insert_with(|| Slot {
                buf: ChunkBuf::empty(coord),
                generated: false,
            })
            .generated = true;
    }

    /// Installs finished chunk data, replacing anything stored for that coordinate.
    pub fn insert_generated(&mut self, buf: ChunkBuf) {
        let coord = buf.coord;
        self.chunks.insert(
            coord,
            Slot {
                buf,
                generated: true,
            },
        );
    }

    pub fn generated_count(&self) -> usize {
        self.chunks.values().filter(|s| s.generated).count()
    }

    /// Chunks with storage, generated or not.
    pub fn allocated_count(&self) -> usize {
        self.chunks.len()
    }
}
