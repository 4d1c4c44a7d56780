use strata_world::ChunkCoord;
use thiserror::Error;

use crate::sink::SinkError;

#[derive(Debug, Error)]
pub enum MeshError {
    /// Meshing requires the chunk's block data; callers generate first.
    #[error("chunk ({}, {}) is not generated", .0.cx, .0.cz)]
    NotGenerated(ChunkCoord),
    #[error("mesh upload failed: {0}")]
    Upload(#[from] SinkError),
}
