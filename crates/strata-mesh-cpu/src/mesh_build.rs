use strata_world::ChunkCoord;

use crate::face::{Face, QUAD_INDICES};
use crate::vertex::{Index, Vertex};

/// One vertex/index stream. Every quad contributes 4 vertices and 6 indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshStream {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<Index>,
}

impl MeshStream {
    #[inline]
    pub fn reserve_quads(&mut self, quads: usize) {
        self.vertices.reserve(quads * 4);
        self.indices.reserve(quads * 6);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Appends one quad; `corners` and `uvs` are in emit order.
    pub fn push_quad(&mut self, face: Face, corners: [[f32; 3]; 4], uvs: [[f32; 2]; 4]) {
        let base = self.vertices.len() as Index;
        let normal = face.normal().to_array();
        for (pos, uv) in corners.into_iter().zip(uvs) {
            self.vertices.push(Vertex {
                pos,
                normal,
                color: Vertex::WHITE,
                uv,
            });
        }
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }
}

/// CPU-side geometry for one chunk, before packing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMeshCpu {
    pub coord: ChunkCoord,
    pub opaque: MeshStream,
    pub transparent: MeshStream,
}

impl ChunkMeshCpu {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            ..Self::default()
        }
    }

    pub fn quad_count(&self) -> usize {
        self.opaque.quad_count() + self.transparent.quad_count()
    }
}
