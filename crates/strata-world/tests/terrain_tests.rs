use strata_blocks::BlockRegistry;
use strata_world::{Mode, TerrainGenerator, WorldGenConfig, WorldPos};

fn generator(cfg: WorldGenConfig) -> TerrainGenerator {
    let reg = BlockRegistry::builtin().expect("registry");
    TerrainGenerator::new(cfg, &reg).expect("generator")
}

#[test]
fn columns_are_deterministic() {
    let a = generator(WorldGenConfig::default());
    let b = generator(WorldGenConfig::default());
    for i in -20..20 {
        let (wx, wz) = (i * 7, -i * 13);
        assert_eq!(a.column(wx, wz), b.column(wx, wz));
    }
}

#[test]
fn column_layers_follow_fill_rules() {
    let terrain = generator(WorldGenConfig::default());
    let b = *terrain.blocks();
    let sea = terrain.config().sea_level;
    for i in 0..64 {
        let col = terrain.column(i * 31 - 900, i * 17 + 40);
        let surface = terrain.column_block(&col, col.height).unwrap();
        assert!(surface == b.grass || surface == b.sand);
        if col.height >= 3 {
            assert_eq!(terrain.column_block(&col, 0), Some(b.stone));
        }
        let above = col.height + 1;
        if above < sea {
            assert_eq!(terrain.column_block(&col, above), Some(b.water));
            assert_eq!(terrain.column_block(&col, sea), None);
        } else {
            assert_eq!(terrain.column_block(&col, above), None);
        }
    }
}

#[test]
fn flat_mode_has_grass_on_stone() {
    let terrain = generator(WorldGenConfig::flat(12));
    assert_eq!(terrain.config().mode, Mode::Flat);
    let b = *terrain.blocks();
    let col = terrain.column(-5, 99);
    assert_eq!(col.height, 11);
    assert_eq!(terrain.column_block(&col, 11), Some(b.grass));
    assert_eq!(terrain.column_block(&col, 0), Some(b.stone));
    assert_eq!(terrain.column_block(&col, 12), None);
    assert!(terrain.tree(&col).is_none());
}

#[test]
fn certain_trees_grow_above_tree_line_only() {
    let mut cfg = WorldGenConfig::default();
    cfg.trees.chance = 1.0;
    let terrain = generator(cfg);
    let line = terrain.config().tree_line;
    let mut seen_high = false;
    for i in 0..256 {
        let col = terrain.column(i * 11, i * -5);
        let tree = terrain.tree(&col);
        if col.height > line {
            seen_high = true;
            let tree = tree.expect("chance 1.0 always plants");
            assert_eq!(tree.root, WorldPos::new(col.wx, col.height, col.wz));
        } else {
            assert!(tree.is_none());
        }
    }
    assert!(seen_high, "sampled no column above the tree line");
}

#[test]
fn missing_block_name_is_an_error() {
    let mut cfg = WorldGenConfig::default();
    cfg.blocks.sand = "gravel".into();
    let reg = BlockRegistry::builtin().unwrap();
    let err = TerrainGenerator::new(cfg, &reg).unwrap_err();
    assert!(err.to_string().contains("gravel"));
}
