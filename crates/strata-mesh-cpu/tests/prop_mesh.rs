use std::sync::Arc;

use hashbrown::HashSet;
use proptest::prelude::*;
use strata_blocks::BlockRegistry;
use strata_chunk::{ChunkBuf, VoxelWorld};
use strata_mesh_cpu::{build_chunk_mesh, pack};
use strata_world::{ChunkCoord, LocalPos, WorldGenConfig};

const DELTAS: [(i32, i32, i32); 6] = [
    (0, 1, 0),
    (0, -1, 0),
    (1, 0, 0),
    (-1, 0, 0),
    (0, 0, 1),
    (0, 0, -1),
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Solid-only chunks emit one quad per block face that touches air.
    #[test]
    fn solid_face_count_matches_exposed_faces(
        cells in prop::collection::hash_set((0i32..16, 0i32..24, 0i32..16), 0..48),
    ) {
        let reg = Arc::new(BlockRegistry::builtin().unwrap());
        let stone = reg.id_by_name("stone").unwrap();
        let mut buf = ChunkBuf::empty(ChunkCoord::new(0, 0));
        for &(x, y, z) in &cells {
            buf.set(LocalPos::new(x as usize, y as usize, z as usize), stone);
        }
        let mut world = VoxelWorld::new(reg, WorldGenConfig::flat(0)).unwrap();
        world.insert_chunk(buf);
        let m = build_chunk_mesh(&mut world, ChunkCoord::new(0, 0)).unwrap();

        let set: HashSet<_> = cells.iter().copied().collect();
        let exposed = cells
            .iter()
            .flat_map(|&(x, y, z)| DELTAS.iter().map(move |&(dx, dy, dz)| (x + dx, y + dy, z + dz)))
            .filter(|n| !set.contains(n))
            .count();
        prop_assert_eq!(m.opaque.quad_count(), exposed);
        prop_assert!(m.transparent.is_empty());
        prop_assert!(m.opaque.indices.iter().all(|&i| (i as usize) < m.opaque.vertices.len()));
        prop_assert_eq!(pack(&m).bytes.len() as u64, pack(&m).layout.total_size());
    }
}
