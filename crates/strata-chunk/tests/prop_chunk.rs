use proptest::prelude::*;
use strata_blocks::AIR;
use strata_chunk::ChunkBuf;
use strata_world::{ChunkCoord, LocalPos, WorldPos};

fn local() -> impl Strategy<Value = LocalPos> {
    (0usize..16, 0usize..256, 0usize..16).prop_map(|(x, y, z)| LocalPos::new(x, y, z))
}

proptest! {
    // Height and count track a sparse set of writes.
    #[test]
    fn height_and_count_match_writes(
        cx in -1000i32..1000,
        cz in -1000i32..1000,
        cells in prop::collection::hash_set((0usize..16, 0usize..256, 0usize..16), 0..64),
        id in 1u8..8,
    ) {
        let mut buf = ChunkBuf::empty(ChunkCoord::new(cx, cz));
        for &(x, y, z) in &cells {
            buf.set(LocalPos::new(x, y, z), id);
        }
        let expect_height = cells.iter().map(|&(_, y, _)| y as u32 + 1).max().unwrap_or(0);
        prop_assert_eq!(buf.max_block_height(), expect_height);
        prop_assert_eq!(buf.num_blocks() as usize, cells.len());
        prop_assert_eq!(buf.is_all_air(), cells.is_empty());
    }

    // World reads agree with local reads inside the chunk and miss outside it.
    #[test]
    fn get_world_matches_local(cx in -1000i32..1000, cz in -1000i32..1000, l in local(), id in 1u8..8) {
        let coord = ChunkCoord::new(cx, cz);
        let mut buf = ChunkBuf::empty(coord);
        buf.set(l, id);
        let p = coord.world_pos(l);
        prop_assert_eq!(buf.get_world(p), Some(id));
        prop_assert_eq!(buf.get_world(p.offset(16, 0, 0)), None);
        prop_assert_eq!(buf.get_world(WorldPos::new(p.x, -1, p.z)), None);
        prop_assert_eq!(buf.get(LocalPos::new((l.x + 1) % 16, l.y, l.z)), AIR);
    }
}
