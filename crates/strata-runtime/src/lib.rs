//! Chunk streaming, rebuild scheduling and edits on top of the voxel world.
#![forbid(unsafe_code)]

mod config;
mod events;
mod manager;
mod queue;
mod record;

pub use config::RenderConfig;
pub use events::{CameraState, TickEvent, UpdateEvent};
pub use manager::{ChunkDraw, ChunkManager, DrawRange, EditOutcome, ManagerStats, UpdateReport};
pub use queue::RebuildQueue;
pub use record::ChunkMeshRecord;
