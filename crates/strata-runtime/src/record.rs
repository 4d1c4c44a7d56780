use strata_mesh_cpu::{GpuMesh, MeshSlots};
use strata_world::ChunkCoord;

/// Per-chunk mesh bookkeeping. A record exists once the chunk entered the streaming window
/// or was edited; `loaded` flips on its first successful rebuild.
#[derive(Debug)]
pub struct ChunkMeshRecord {
    pub coord: ChunkCoord,
    pub slots: MeshSlots,
    pub dirty: bool,
    pub resort_dirty: bool,
    pub loaded: bool,
}

impl ChunkMeshRecord {
    pub fn new(coord: ChunkCoord, ring: usize) -> Self {
        Self {
            coord,
            slots: MeshSlots::new(ring),
            dirty: true,
            resort_dirty: false,
            loaded: false,
        }
    }

    /// Mesh in the slot the renderer may read this frame.
    #[inline]
    pub fn current(&self) -> Option<&GpuMesh> {
        self.slots.current()
    }
}
