use strata_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    /// All faces in atlas/normal table order.
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Unit normal pointing out of the block through this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }

    /// Grid step to the neighbor across this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// Cube corners of this face in emit order, as offsets from the block's min corner.
    #[inline]
    pub fn corners(self) -> [[f32; 3]; 4] {
        let ids = FACE_CORNERS[self.index()];
        [
            BLOCK_CORNERS[ids[0]],
            BLOCK_CORNERS[ids[1]],
            BLOCK_CORNERS[ids[2]],
            BLOCK_CORNERS[ids[3]],
        ]
    }
}

/// Unit cube corners.
pub const BLOCK_CORNERS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Corner ids per face, wound so `QUAD_INDICES` gives outward-facing triangles.
pub const FACE_CORNERS: [[usize; 4]; 6] = [
    [2, 5, 7, 4],
    [1, 6, 3, 0],
    [1, 4, 7, 6],
    [3, 5, 2, 0],
    [6, 7, 5, 3],
    [0, 2, 4, 1],
];

/// Triangle list for one quad.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Per-corner UVs inside one atlas cell, in units of cells.
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
