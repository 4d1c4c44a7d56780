use strata_blocks::{AIR, BlockId};
use strata_world::{CHUNK_AREA, CHUNK_VOLUME, ChunkCoord, LocalPos, WorldPos};

/// Dense `16 x 256 x 16` block array of one chunk.
#[derive(Clone, PartialEq, Eq)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub blocks: Box<[BlockId]>,
}

impl ChunkBuf {
    pub fn empty(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![AIR; CHUNK_VOLUME].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn get(&self, local: LocalPos) -> BlockId {
        self.blocks[local.index()]
    }

    #[inline]
    pub fn set(&mut self, local: LocalPos, id: BlockId) {
        self.blocks[local.index()] = id;
    }

    /// Reads a world position if it falls inside this chunk.
    #[inline]
    pub fn get_world(&self, pos: WorldPos) -> Option<BlockId> {
        let (chunk, local) = pos.split()?;
        (chunk == self.coord).then(|| self.get(local))
    }

    /// Highest occupied `y` plus one; 0 for an all-air chunk.
    pub fn max_block_height(&self) -> u32 {
        self.blocks
            .chunks_exact(CHUNK_AREA)
            .rposition(|layer| layer.iter().any(|&b| b != AIR))
            .map_or(0, |y| y as u32 + 1)
    }

    /// Number of non-air cells.
    pub fn num_blocks(&self) -> u32 {
        self.blocks.iter().filter(|&&b| b != AIR).count() as u32
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|&b| b == AIR)
    }
}

impl std::fmt::Debug for ChunkBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkBuf")
            .field("coord", &self.coord)
            .field("num_blocks", &self.num_blocks())
            .finish()
    }
}
