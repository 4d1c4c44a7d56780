//! Chunk meshing: face culling into opaque and transparent streams, packing into a single
//! buffer image, frame-in-flight slots and back-to-front resorting of transparent quads.
#![forbid(unsafe_code)]

mod build;
mod error;
pub mod face;
mod mesh_build;
mod pack;
mod resort;
mod sink;
mod slots;
mod vertex;

pub use build::{HOLES_NUDGE, LIQUID_TOP_DROP, build_chunk_mesh, face_visible};
pub use error::MeshError;
pub use face::Face;
pub use mesh_build::{ChunkMeshCpu, MeshStream};
pub use pack::{MeshLayout, PackedMesh, Region, pack};
pub use resort::{resort_transparent, sort_quads_back_to_front};
pub use sink::{BufferHandle, HostMeshSink, MeshSink, SinkError};
pub use slots::{GpuMesh, MeshSlots};
pub use vertex::{INDEX_SIZE, Index, Vertex};
