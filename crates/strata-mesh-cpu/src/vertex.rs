use bytemuck::{Pod, Zeroable};

/// GPU vertex: chunk-local position, face normal, tint, atlas UV.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const SIZE: usize = std::mem::size_of::<Vertex>();
    /// Vertex tint until lighting feeds into it.
    pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
}

pub type Index = u32;
pub const INDEX_SIZE: usize = std::mem::size_of::<Index>();
