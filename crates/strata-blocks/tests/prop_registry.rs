use proptest::prelude::*;
use strata_blocks::config::{BlockDef, BlocksConfig};
use strata_blocks::registry::BlockRegistry;

fn def(name: String, col: u8, row: u8) -> BlockDef {
    BlockDef {
        name,
        tile: [col, row],
        top: None,
        bottom: None,
        side: None,
        flags: Vec::new(),
    }
}

proptest! {
    // Ids are assigned in definition order and round-trip through names.
    #[test]
    fn ids_follow_definition_order(
        names in prop::collection::hash_set("[a-z]{1,8}", 1..64),
        col in 0u8..8,
        row in 0u8..8,
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let cfg = BlocksConfig {
            atlas_size: 8,
            blocks: names.iter().cloned().map(|n| def(n, col, row)).collect(),
        };
        let reg = BlockRegistry::from_config(cfg).unwrap();
        prop_assert_eq!(reg.len(), names.len());
        for (i, name) in names.iter().enumerate() {
            let id = reg.id_by_name(name).unwrap();
            prop_assert_eq!(id as usize, i + 1);
            prop_assert_eq!(&reg.get(id).unwrap().name, name);
        }
    }
}
