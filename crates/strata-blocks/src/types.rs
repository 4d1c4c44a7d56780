use bitflags::bitflags;

/// Block identifier. `0` is air; `1..=N` index the registry.
pub type BlockId = u8;

pub const AIR: BlockId = 0;

/// Faces per block, ordered +Y, -Y, +X, -X, +Z, -Z.
pub const FACE_COUNT: usize = 6;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BlockFlags: u8 {
        /// Neighbors keep their faces behind this block (foliage).
        const HOLES = 1 << 0;
        /// Drawn in the blended pass and depth sorted.
        const TRANSPARENT = 1 << 1;
        /// Lowered top surface; ignored by block picking.
        const LIQUID = 1 << 2;
    }
}

/// Top-left corner of an atlas cell in normalized UV space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AtlasOffset {
    pub u: f32,
    pub v: f32,
}

impl AtlasOffset {
    #[inline]
    pub fn from_tile(col: u8, row: u8, atlas_size: u32) -> Self {
        let cell = 1.0 / atlas_size as f32;
        Self {
            u: col as f32 * cell,
            v: row as f32 * cell,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockDescriptor {
    pub name: String,
    pub textures: [AtlasOffset; FACE_COUNT],
    pub flags: BlockFlags,
}

impl BlockDescriptor {
    #[inline]
    pub fn has(&self, flag: BlockFlags) -> bool {
        self.flags.contains(flag)
    }

    #[inline]
    pub fn texture(&self, face: usize) -> AtlasOffset {
        self.textures[face]
    }
}
