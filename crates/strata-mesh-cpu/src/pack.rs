use crate::mesh_build::ChunkMeshCpu;
use crate::vertex::{INDEX_SIZE, Vertex};

/// Byte range of one region inside a packed mesh buffer, plus its element count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    pub offset: u64,
    pub size: u64,
    pub count: u32,
}

impl Region {
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Offsets of the four regions, always laid out as
/// `[opaque vertices][opaque indices][transparent vertices][transparent indices]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshLayout {
    pub opaque_vertices: Region,
    pub opaque_indices: Region,
    pub transparent_vertices: Region,
    pub transparent_indices: Region,
}

impl MeshLayout {
    pub fn for_counts(opaque_v: usize, opaque_i: usize, transparent_v: usize, transparent_i: usize) -> Self {
        let mut cursor = 0u64;
        let mut next = |count: usize, stride: usize| {
            let size = (count * stride) as u64;
            let r = Region {
                offset: cursor,
                size,
                count: count as u32,
            };
            cursor += size;
            r
        };
        Self {
            opaque_vertices: next(opaque_v, Vertex::SIZE),
            opaque_indices: next(opaque_i, INDEX_SIZE),
            transparent_vertices: next(transparent_v, Vertex::SIZE),
            transparent_indices: next(transparent_i, INDEX_SIZE),
        }
    }

    #[inline]
    pub fn total_size(&self) -> u64 {
        self.transparent_indices.end()
    }

    #[inline]
    pub fn regions(&self) -> [Region; 4] {
        [
            self.opaque_vertices,
            self.opaque_indices,
            self.transparent_vertices,
            self.transparent_indices,
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedMesh {
    pub bytes: Vec<u8>,
    pub layout: MeshLayout,
}

/// Concatenates both streams into one buffer image.
pub fn pack(mesh: &ChunkMeshCpu) -> PackedMesh {
    let layout = MeshLayout::for_counts(
        mesh.opaque.vertices.len(),
        mesh.opaque.indices.len(),
        mesh.transparent.vertices.len(),
        mesh.transparent.indices.len(),
    );
    let mut bytes = Vec::with_capacity(layout.total_size() as usize);
    bytes.extend_from_slice(bytemuck::cast_slice(&mesh.opaque.vertices));
    bytes.extend_from_slice(bytemuck::cast_slice(&mesh.opaque.indices));
    bytes.extend_from_slice(bytemuck::cast_slice(&mesh.transparent.vertices));
    bytes.extend_from_slice(bytemuck::cast_slice(&mesh.transparent.indices));
    debug_assert_eq!(bytes.len() as u64, layout.total_size());
    PackedMesh { bytes, layout }
}
