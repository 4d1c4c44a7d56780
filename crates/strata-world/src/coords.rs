use serde::{Deserialize, Serialize};

/// Horizontal edge length of a chunk, in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// Vertical extent of the world, in blocks.
pub const CHUNK_HEIGHT: i32 = 256;
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_HEIGHT as usize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dz * dz
    }

    /// Chunk holding the world column `(wx, wz)`.
    #[inline]
    pub fn containing(wx: i32, wz: i32) -> Self {
        Self {
            cx: wx.div_euclid(CHUNK_SIZE),
            cz: wz.div_euclid(CHUNK_SIZE),
        }
    }

    /// Chunk under a continuous horizontal position.
    #[inline]
    pub fn containing_point(x: f32, z: f32) -> Self {
        Self::containing(x.floor() as i32, z.floor() as i32)
    }

    /// World x/z of local (0, 0).
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        (self.cx * CHUNK_SIZE, self.cz * CHUNK_SIZE)
    }

    /// Squared horizontal distance from `(x, z)` to the chunk's center.
    #[inline]
    pub fn center_distance_sq(self, x: f32, z: f32) -> f32 {
        let (ox, oz) = self.origin();
        let half = CHUNK_SIZE as f32 * 0.5;
        let dx = ox as f32 + half - x;
        let dz = oz as f32 + half - z;
        dx * dx + dz * dz
    }

    /// This chunk and its eight horizontal neighbors, row by row.
    pub fn neighborhood(self) -> impl Iterator<Item = ChunkCoord> {
        (-1..=1).flat_map(move |dz| (-1..=1).map(move |dx| self.offset(dx, dz)))
    }

    /// World position of a local position inside this chunk.
    #[inline]
    pub fn world_pos(self, local: LocalPos) -> WorldPos {
        let (ox, oz) = self.origin();
        WorldPos::new(ox + local.x as i32, local.y as i32, oz + local.z as i32)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}

/// Block offset inside a chunk: x, z in `[0, 16)`, y in `[0, 256)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Dense array index, `y * 256 + z * 16 + x`.
    #[inline]
    pub fn index(self) -> usize {
        self.y * CHUNK_AREA + self.z * CHUNK_SIZE as usize + self.x
    }

    #[inline]
    pub fn from_index(i: usize) -> Self {
        let size = CHUNK_SIZE as usize;
        Self {
            x: i % size,
            z: (i / size) % size,
            y: i / CHUNK_AREA,
        }
    }

    /// True when the position touches one of the four vertical chunk walls.
    #[inline]
    pub fn on_horizontal_border(self) -> bool {
        let last = CHUNK_SIZE as usize - 1;
        self.x == 0 || self.x == last || self.z == 0 || self.z == last
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn in_height_range(self) -> bool {
        (0..CHUNK_HEIGHT).contains(&self.y)
    }

    #[inline]
    pub fn chunk(self) -> ChunkCoord {
        ChunkCoord::containing(self.x, self.z)
    }

    /// Floor-division split into chunk and local position; `None` outside the height range.
    #[inline]
    pub fn split(self) -> Option<(ChunkCoord, LocalPos)> {
        if !self.in_height_range() {
            return None;
        }
        let local = LocalPos::new(
            self.x.rem_euclid(CHUNK_SIZE) as usize,
            self.y as usize,
            self.z.rem_euclid(CHUNK_SIZE) as usize,
        );
        Some((self.chunk(), local))
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Block containing a continuous position.
    #[inline]
    pub fn containing(x: f32, y: f32, z: f32) -> Self {
        Self::new(x.floor() as i32, y.floor() as i32, z.floor() as i32)
    }
}

impl From<(i32, i32, i32)> for WorldPos {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_world_x_maps_to_last_local_column() {
        let (chunk, local) = WorldPos::new(-1, 10, 0).split().unwrap();
        assert_eq!(chunk, ChunkCoord::new(-1, 0));
        assert_eq!(local, LocalPos::new(15, 10, 0));
    }

    #[test]
    fn height_range_is_enforced() {
        assert!(WorldPos::new(0, -1, 0).split().is_none());
        assert!(WorldPos::new(0, CHUNK_HEIGHT, 0).split().is_none());
        assert!(WorldPos::new(0, CHUNK_HEIGHT - 1, 0).split().is_some());
    }

    #[test]
    fn index_layout_is_y_major() {
        assert_eq!(LocalPos::new(1, 0, 0).index(), 1);
        assert_eq!(LocalPos::new(0, 0, 1).index(), 16);
        assert_eq!(LocalPos::new(0, 1, 0).index(), 256);
        assert_eq!(LocalPos::from_index(256 + 16 + 1), LocalPos::new(1, 1, 1));
    }

    #[test]
    fn neighborhood_covers_three_by_three() {
        let mut around: Vec<_> = ChunkCoord::new(4, -2).neighborhood().collect();
        around.sort();
        assert_eq!(around.len(), 9);
        assert_eq!(around[0], ChunkCoord::new(3, -3));
        assert_eq!(around[8], ChunkCoord::new(5, -1));
    }
}
