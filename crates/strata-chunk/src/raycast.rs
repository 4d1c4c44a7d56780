use strata_blocks::{AIR, BlockFlags, BlockId, BlockRegistry};
use strata_geom::{Aabb, Ray, Vec3};
use strata_world::{CHUNK_HEIGHT, ChunkCoord, WorldPos};

use crate::grid::VoxelGrid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockHit {
    pub block_pos: WorldPos,
    pub chunk: ChunkCoord,
    pub block: BlockId,
    /// Distance along the normalized ray to the entered face.
    pub distance: f32,
    pub world_pos: Vec3,
    /// Outward normal of the entered face.
    pub normal: Vec3,
}

impl BlockHit {
    /// Cell in front of the hit face, where a placed block would go.
    pub fn adjacent(&self) -> WorldPos {
        self.block_pos.offset(
            self.normal.x as i32,
            self.normal.y as i32,
            self.normal.z as i32,
        )
    }
}

/// Longest ray the scan will follow; larger reaches are cut down to it.
pub const MAX_RAY_DISTANCE: f32 = 1024.0;

/// Nearest solid, non-liquid block hit by the ray within `max_distance`.
///
/// Tests every generated block in the floor-aligned box around the segment (padded by one
/// block) against its unit cube. Hits at `t <= 0` are ignored, so a ray starting inside a
/// block does not report that block. Chunks that are not generated are treated as empty.
pub fn raytrace(
    grid: &VoxelGrid,
    reg: &BlockRegistry,
    origin: Vec3,
    dir: Vec3,
    max_distance: f32,
) -> Option<BlockHit> {
    if !(max_distance > 0.0) {
        return None;
    }
    let max_distance = max_distance.min(MAX_RAY_DISTANCE);
    let ray = Ray::new(origin, dir)?;
    let end = ray.at(max_distance);
    let lo = origin.min(end).floor();
    let hi = origin.max(end).floor();

    // Float-to-int casts saturate, so the padding must too.
    let x0 = (lo.x as i32).saturating_sub(1);
    let x1 = (hi.x as i32).saturating_add(1);
    let y0 = (lo.y as i32).saturating_sub(1).max(0);
    let y1 = (hi.y as i32).saturating_add(1).min(CHUNK_HEIGHT - 1);
    let z0 = (lo.z as i32).saturating_sub(1);
    let z1 = (hi.z as i32).saturating_add(1);

    let mut best: Option<BlockHit> = None;
    let mut best_t = max_distance;
    for x in x0..=x1 {
        for y in y0..=y1 {
            for z in z0..=z1 {
                let pos = WorldPos::new(x, y, z);
                let Some(id) = grid.block(pos) else {
                    continue;
                };
                if id == AIR || reg.flags(id).contains(BlockFlags::LIQUID) {
                    continue;
                }
                let Some(hit) = Aabb::unit_cube(x, y, z).intersect_ray(&ray) else {
                    continue;
                };
                let t = hit.t_enter;
                if t > 0.0 && t < best_t {
                    best_t = t;
                    best = Some(BlockHit {
                        block_pos: pos,
                        chunk: pos.chunk(),
                        block: id,
                        distance: t,
                        world_pos: ray.at(t),
                        normal: hit.normal,
                    });
                }
            }
        }
    }
    best
}
