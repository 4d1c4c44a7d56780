use std::sync::Arc;

use strata_blocks::{AIR, BlockFlags, BlockId, BlockRegistry};
use strata_chunk::VoxelWorld;
use strata_world::{CHUNK_SIZE, ChunkCoord, WorldPos};

use crate::error::MeshError;
use crate::face::{Face, QUAD_UVS};
use crate::mesh_build::ChunkMeshCpu;

/// How far liquid surfaces sit below the top of their cell.
pub const LIQUID_TOP_DROP: f32 = 0.0625;
/// Outward push for faces that border a `HOLES` block.
pub const HOLES_NUDGE: f32 = 0.001;

/// Whether a face of `block` is drawn when `neighbor` sits across it.
#[inline]
pub fn face_visible(reg: &BlockRegistry, block: BlockId, neighbor: BlockId) -> bool {
    if neighbor == AIR {
        return true;
    }
    let flags = reg.flags(neighbor);
    flags.contains(BlockFlags::HOLES) || (flags.contains(BlockFlags::TRANSPARENT) && neighbor != block)
}

/// Builds opaque and transparent geometry for one generated chunk.
///
/// Neighbor reads go through [`VoxelWorld::block_at`], so reading across the chunk edge
/// generates the neighbor if it is missing.
pub fn build_chunk_mesh(world: &mut VoxelWorld, coord: ChunkCoord) -> Result<ChunkMeshCpu, MeshError> {
    if !world.is_generated(coord) {
        return Err(MeshError::NotGenerated(coord));
    }
    let reg = Arc::clone(world.registry());
    let top = world.max_block_height(coord) as i32;
    let tile = reg.tile_uv();
    let (ox, oz) = coord.origin();

    let mut out = ChunkMeshCpu::new(coord);
    // Exposed faces are a fraction of all cells; one quad per block is a fair first guess.
    out.opaque.reserve_quads(world.num_blocks(coord) as usize);

    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            for y in 0..top {
                let pos = WorldPos::new(ox + x, y, oz + z);
                let block = world.block_at(pos);
                if block == AIR {
                    continue;
                }
                let Some(desc) = reg.get(block) else {
                    log::warn!(target: "mesh", "unknown block id {} at {:?}", block, pos);
                    continue;
                };
                let transparent = desc.has(BlockFlags::TRANSPARENT);
                let liquid = desc.has(BlockFlags::LIQUID);
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    let neighbor = world.block_at(pos.offset(dx, dy, dz));
                    if !face_visible(&reg, block, neighbor) {
                        continue;
                    }
                    let nudge = if reg.flags(neighbor).contains(BlockFlags::HOLES) {
                        face.normal() * HOLES_NUDGE
                    } else {
                        strata_geom::Vec3::ZERO
                    };
                    let mut corners = face.corners();
                    for c in &mut corners {
                        if liquid && c[1] == 1.0 {
                            c[1] -= LIQUID_TOP_DROP;
                        }
                        c[0] += x as f32 + nudge.x;
                        c[1] += y as f32 + nudge.y;
                        c[2] += z as f32 + nudge.z;
                    }
                    let offset = desc.texture(face.index());
                    let uvs = QUAD_UVS.map(|[u, v]| [offset.u + u * tile, offset.v + v * tile]);
                    let stream = if transparent {
                        &mut out.transparent
                    } else {
                        &mut out.opaque
                    };
                    stream.push_quad(face, corners, uvs);
                }
            }
        }
    }

    log::trace!(
        target: "mesh",
        "built chunk ({}, {}): {} opaque quads, {} transparent quads",
        coord.cx,
        coord.cz,
        out.opaque.quad_count(),
        out.transparent.quad_count()
    );
    Ok(out)
}
