use strata_blocks::{BlockId, BlockRegistry};

use crate::coords::{CHUNK_HEIGHT, WorldPos};
use crate::noise::SimplexNoise;
use crate::trees::{ColumnRng, TreePlan};
use crate::worldgen::{Mode, WorldGenConfig, WorldGenError};

/// Salt separating the detail noise's second sample from the first.
const DETAIL_SECOND_SAMPLE: f32 = 1000.0;
/// Highest surface the generator produces; leaves room for trees above it.
const MAX_SURFACE: i32 = CHUNK_HEIGHT - 16;

/// Block ids resolved once from the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainBlocks {
    pub grass: BlockId,
    pub dirt: BlockId,
    pub stone: BlockId,
    pub water: BlockId,
    pub sand: BlockId,
    pub log: BlockId,
    pub leaves: BlockId,
}

impl TerrainBlocks {
    pub fn resolve(reg: &BlockRegistry, cfg: &WorldGenConfig) -> Result<Self, WorldGenError> {
        let names = &cfg.blocks;
        let id = |name: &str| {
            reg.id_by_name(name)
                .ok_or_else(|| WorldGenError::MissingBlock(name.to_string()))
        };
        Ok(Self {
            grass: id(&names.grass)?,
            dirt: id(&names.dirt)?,
            stone: id(&names.stone)?,
            water: id(&names.water)?,
            sand: id(&names.sand)?,
            log: id(&names.log)?,
            leaves: id(&names.leaves)?,
        })
    }
}

/// Sampled shape of one world column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSample {
    pub wx: i32,
    pub wz: i32,
    /// Y of the surface block.
    pub height: i32,
    /// Shifts the grass/sand boundary up or down by a block or two.
    pub sand_offset: i32,
}

pub struct TerrainGenerator {
    cfg: WorldGenConfig,
    blocks: TerrainBlocks,
    height: SimplexNoise,
    detail: SimplexNoise,
    sand: SimplexNoise,
}

impl TerrainGenerator {
    pub fn new(cfg: WorldGenConfig, reg: &BlockRegistry) -> Result<Self, WorldGenError> {
        let blocks = TerrainBlocks::resolve(reg, &cfg)?;
        let seed = cfg.seed;
        Ok(Self {
            height: SimplexNoise::new(seed, cfg.height.noise),
            detail: SimplexNoise::new(seed ^ 0x5f3a_1c07, cfg.detail.noise),
            sand: SimplexNoise::new(seed ^ 0x2b9d_44e1, cfg.sand.noise),
            cfg,
            blocks,
        })
    }

    #[inline]
    pub fn config(&self) -> &WorldGenConfig {
        &self.cfg
    }

    #[inline]
    pub fn blocks(&self) -> &TerrainBlocks {
        &self.blocks
    }

    pub fn column(&self, wx: i32, wz: i32) -> ColumnSample {
        match self.cfg.mode {
            Mode::Flat => ColumnSample {
                wx,
                wz,
                height: self.cfg.flat.thickness.clamp(0, CHUNK_HEIGHT) - 1,
                sand_offset: 0,
            },
            Mode::Normal => {
                let (x, z) = (wx as f32, wz as f32);
                let octaves = self.cfg.detail.octaves;
                let n1 = self.detail.fractal(octaves, x, z);
                let n2 = self.detail.fractal(
                    octaves,
                    x + DETAIL_SECOND_SAMPLE,
                    z + DETAIL_SECOND_SAMPLE,
                );
                let h = &self.cfg.height;
                let raw = self
                    .height
                    .fractal(h.octaves, x + h.warp * n1, z + h.warp * n2);
                let height = (raw * h.scale + h.base).floor() as i32;
                let sand_offset = (self.sand.noise(x, z) * self.cfg.sand.scale) as i32;
                ColumnSample {
                    wx,
                    wz,
                    height: height.clamp(1, MAX_SURFACE),
                    sand_offset,
                }
            }
        }
    }

    /// Block at height `y` of a sampled column, or `None` once the column is above both its
    /// surface and sea level (the fill stops there).
    pub fn column_block(&self, col: &ColumnSample, y: i32) -> Option<BlockId> {
        let b = &self.blocks;
        if self.cfg.mode == Mode::Flat {
            return if y > col.height {
                None
            } else if y == col.height {
                Some(b.grass)
            } else {
                Some(b.stone)
            };
        }
        let grassy = y > self.cfg.tree_line + col.sand_offset;
        if y == col.height {
            Some(if grassy { b.grass } else { b.sand })
        } else if y < col.height && y >= col.height - 2 {
            Some(if grassy { b.dirt } else { b.sand })
        } else if y < col.height {
            Some(b.stone)
        } else if y < self.cfg.sea_level {
            Some(b.water)
        } else {
            None
        }
    }

    /// Tree rooted on this column's surface, if it grows one.
    pub fn tree(&self, col: &ColumnSample) -> Option<TreePlan> {
        if self.cfg.mode == Mode::Flat || col.height <= self.cfg.tree_line {
            return None;
        }
        let mut rng = ColumnRng::for_column(col.wx, col.wz, self.cfg.seed as u32);
        TreePlan::roll(
            &mut rng,
            WorldPos::new(col.wx, col.height, col.wz),
            self.cfg.trees.chance,
            self.blocks.log,
            self.blocks.leaves,
        )
    }
}

impl std::fmt::Debug for TerrainGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerrainGenerator")
            .field("cfg", &self.cfg)
            .field("blocks", &self.blocks)
            .finish_non_exhaustive()
    }
}
