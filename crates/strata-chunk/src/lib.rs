//! Chunk storage, the voxel grid, lazy generation, and block picking.
#![forbid(unsafe_code)]

mod buf;
pub mod generate;
mod grid;
pub mod raycast;
mod world;

pub use buf::ChunkBuf;
pub use generate::generate_chunk;
pub use grid::VoxelGrid;
pub use raycast::{BlockHit, raytrace};
pub use world::VoxelWorld;
