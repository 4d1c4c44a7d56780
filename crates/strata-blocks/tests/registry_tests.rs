use strata_blocks::registry::{BlockRegistry, RegistryError};
use strata_blocks::types::{AtlasOffset, BlockFlags};

#[test]
fn builtin_flags_match_roles() {
    let reg = BlockRegistry::builtin().expect("registry");
    let water = reg.id_by_name("water").unwrap();
    let leaves = reg.id_by_name("leaves").unwrap();
    let stone = reg.id_by_name("stone").unwrap();
    assert!(reg.flags(water).contains(BlockFlags::TRANSPARENT | BlockFlags::LIQUID));
    assert_eq!(reg.flags(leaves), BlockFlags::HOLES);
    assert!(reg.flags(stone).is_empty());
}

#[test]
fn face_overrides_resolve_in_face_order() {
    let reg = BlockRegistry::builtin().expect("registry");
    let grass = reg.get(reg.id_by_name("grass").unwrap()).unwrap();
    let cell = 1.0 / 8.0;
    assert_eq!(grass.texture(0), AtlasOffset { u: 2.0 * cell, v: 0.0 });
    assert_eq!(grass.texture(1), AtlasOffset { u: cell, v: 0.0 });
    for face in 2..6 {
        assert_eq!(grass.texture(face), AtlasOffset { u: 0.0, v: 0.0 });
    }
}

#[test]
fn duplicate_names_are_rejected() {
    let err = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "a"
        tile = [0, 0]
        [[blocks]]
        name = "a"
        tile = [1, 0]
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName(name) if name == "a"));
}

#[test]
fn unknown_flag_is_rejected() {
    let err = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "glass"
        tile = [0, 0]
        flags = ["shiny"]
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownFlag { .. }));
}

#[test]
fn tile_outside_atlas_is_rejected() {
    let err = BlockRegistry::from_toml_str(
        r#"
        atlas_size = 4
        [[blocks]]
        name = "far"
        tile = [4, 0]
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, RegistryError::TileOutOfAtlas { atlas_size: 4, .. }));
}

#[test]
fn flags_are_case_insensitive() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "glass"
        tile = [0, 0]
        flags = ["Transparent", "HOLES"]
    "#,
    )
    .unwrap();
    assert_eq!(reg.flags(1), BlockFlags::TRANSPARENT | BlockFlags::HOLES);
}
