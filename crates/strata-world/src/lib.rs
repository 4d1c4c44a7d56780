//! World coordinates, noise fields, and terrain/tree planning.
#![forbid(unsafe_code)]

pub mod coords;
pub mod noise;
pub mod terrain;
pub mod trees;
pub mod worldgen;

pub use coords::{
    CHUNK_AREA, CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord, LocalPos, WorldPos,
};
pub use noise::{NoiseParams, SimplexNoise};
pub use terrain::{ColumnSample, TerrainBlocks, TerrainGenerator};
pub use trees::{ColumnRng, TreeBlock, TreePlan};
pub use worldgen::{Mode, TreePlacement, WorldGenConfig, WorldGenError};
