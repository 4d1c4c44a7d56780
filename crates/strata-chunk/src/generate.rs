use strata_blocks::AIR;
use strata_world::trees::LEAF_REACH;
use strata_world::{
    CHUNK_HEIGHT, CHUNK_SIZE, ChunkCoord, ColumnSample, LocalPos, TerrainGenerator,
    TreePlacement, TreePlan,
};

use crate::buf::ChunkBuf;
use crate::grid::VoxelGrid;

/// Fills `coord` from the terrain generator and marks it generated.
///
/// Already generated chunks are left untouched so edits survive; the mark is re-asserted
/// either way. Returns whether a generation pass actually ran.
pub fn generate_chunk(grid: &mut VoxelGrid, terrain: &TerrainGenerator, coord: ChunkCoord) -> bool {
    if grid.is_generated(coord) {
        grid.mark_generated(coord);
        return false;
    }
    let placement = terrain.config().trees.placement;
    let (ox, oz) = coord.origin();
    let mut trees = 0usize;
    let mut spilled = 0usize;
    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            let col = terrain.column(ox + x, oz + z);
            fill_column(grid.storage_mut(coord), terrain, &col, x as usize, z as usize);
            if placement == TreePlacement::Spill {
                if let Some(tree) = terrain.tree(&col) {
                    trees += 1;
                    spilled += place_spilling(grid, coord, &tree);
                }
            }
        }
    }
    if placement == TreePlacement::Staged {
        trees = place_staged(grid.storage_mut(coord), terrain, coord);
    }
    grid.mark_generated(coord);
    log::debug!(
        target: "worldgen",
        "generated chunk ({}, {}): {} trees, {} blocks spilled",
        coord.cx,
        coord.cz,
        trees,
        spilled
    );
    true
}

fn fill_column(buf: &mut ChunkBuf, terrain: &TerrainGenerator, col: &ColumnSample, x: usize, z: usize) {
    for y in 0..CHUNK_HEIGHT {
        let Some(id) = terrain.column_block(col, y) else {
            break;
        };
        let local = LocalPos::new(x, y as usize, z);
        // Blocks already present were placed by a neighbor's tree; keep them.
        if buf.get(local) == AIR {
            buf.set(local, id);
        }
    }
}

/// Writes a tree through the world-to-chunk mapping. Blocks past the chunk edge land in
/// the neighbor's storage without generating it. Returns how many blocks left `home`.
fn place_spilling(grid: &mut VoxelGrid, home: ChunkCoord, tree: &TreePlan) -> usize {
    let mut spilled = 0;
    for b in &tree.blocks {
        let Some((coord, local)) = b.pos.split() else {
            continue;
        };
        if coord != home {
            spilled += 1;
        }
        grid.storage_mut(coord).set(local, b.block);
    }
    spilled
}

/// Re-plans every tree whose footprint can reach `coord` and keeps the blocks that fall
/// inside it. Columns are visited in world order so overlaps resolve the same way in every
/// chunk. Returns the number of trees touching the chunk.
fn place_staged(buf: &mut ChunkBuf, terrain: &TerrainGenerator, coord: ChunkCoord) -> usize {
    let (ox, oz) = coord.origin();
    let mut trees = 0;
    for wz in (oz - LEAF_REACH)..(oz + CHUNK_SIZE + LEAF_REACH) {
        for wx in (ox - LEAF_REACH)..(ox + CHUNK_SIZE + LEAF_REACH) {
            let col = terrain.column(wx, wz);
            let Some(tree) = terrain.tree(&col) else {
                continue;
            };
            trees += 1;
            for b in &tree.blocks {
                if let Some((c, local)) = b.pos.split() {
                    if c == coord {
                        buf.set(local, b.block);
                    }
                }
            }
        }
    }
    trees
}
