use std::sync::Arc;

use strata_blocks::{AIR, BlockId, BlockRegistry};
use strata_geom::Vec3;
use strata_world::{ChunkCoord, LocalPos, TerrainGenerator, WorldGenConfig, WorldGenError, WorldPos};

use crate::buf::ChunkBuf;
use crate::generate::generate_chunk;
use crate::grid::VoxelGrid;
use crate::raycast::{BlockHit, raytrace};

/// The voxel grid plus the generator that fills it on first access.
///
/// All reads that may need missing data go through the get-or-generate accessors here, so
/// nothing outside holds a reference into storage across a generating call.
#[derive(Debug)]
pub struct VoxelWorld {
    grid: VoxelGrid,
    terrain: TerrainGenerator,
    registry: Arc<BlockRegistry>,
    generation_passes: u64,
}

impl VoxelWorld {
    pub fn new(registry: Arc<BlockRegistry>, cfg: WorldGenConfig) -> Result<Self, WorldGenError> {
        let terrain = TerrainGenerator::new(cfg, &registry)?;
        Ok(Self::with_generator(registry, terrain))
    }

    pub fn with_generator(registry: Arc<BlockRegistry>, terrain: TerrainGenerator) -> Self {
        Self {
            grid: VoxelGrid::new(),
            terrain,
            registry,
            generation_passes: 0,
        }
    }

    #[inline]
    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    #[inline]
    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Number of generation passes that actually ran.
    #[inline]
    pub fn generation_passes(&self) -> u64 {
        self.generation_passes
    }

    #[inline]
    pub fn is_generated(&self, coord: ChunkCoord) -> bool {
        self.grid.is_generated(coord)
    }

    /// Generates `coord` unless it already is. Returns whether a pass ran.
    pub fn ensure_generated(&mut self, coord: ChunkCoord) -> bool {
        let ran = generate_chunk(&mut self.grid, &self.terrain, coord);
        if ran {
            self.generation_passes += 1;
        }
        ran
    }

    /// Generates `coord` and its eight horizontal neighbors.
    pub fn ensure_neighborhood(&mut self, coord: ChunkCoord) {
        for c in coord.neighborhood() {
            self.ensure_generated(c);
        }
    }

    /// Installs hand-built chunk data as generated.
    pub fn insert_chunk(&mut self, buf: ChunkBuf) {
        self.grid.insert_generated(buf);
    }

    /// Block at `pos`, generating the owning chunk first if needed. Out-of-range `y` reads
    /// as air without touching the grid.
    pub fn block_at(&mut self, pos: WorldPos) -> BlockId {
        let Some((coord, local)) = pos.split() else {
            return AIR;
        };
        self.ensure_generated(coord);
        self.grid.get(coord).map_or(AIR, |buf| buf.get(local))
    }

    /// Block at `pos` without generating; `None` if the chunk is not generated.
    #[inline]
    pub fn peek(&self, pos: WorldPos) -> Option<BlockId> {
        self.grid.block(pos)
    }

    /// Writes `id` at `pos`, generating the owning chunk first. Returns the chunk and
    /// local position written, or `None` when `y` is out of range.
    pub fn set_block(&mut self, pos: WorldPos, id: BlockId) -> Option<(ChunkCoord, LocalPos)> {
        let (coord, local) = pos.split()?;
        self.ensure_generated(coord);
        self.grid.storage_mut(coord).set(local, id);
        Some((coord, local))
    }

    #[inline]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        self.grid.get(coord)
    }

    /// Highest occupied `y` + 1 of a generated chunk; 0 otherwise.
    pub fn max_block_height(&self, coord: ChunkCoord) -> u32 {
        self.grid.get(coord).map_or(0, ChunkBuf::max_block_height)
    }

    /// Non-air cells of a generated chunk; 0 otherwise.
    pub fn num_blocks(&self, coord: ChunkCoord) -> u32 {
        self.grid.get(coord).map_or(0, ChunkBuf::num_blocks)
    }

    pub fn raytrace(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<BlockHit> {
        raytrace(&self.grid, &self.registry, origin, dir, max_distance)
    }
}
