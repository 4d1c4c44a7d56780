use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::noise::NoiseParams;

#[derive(Debug, Error)]
pub enum WorldGenError {
    #[error("failed to read worldgen config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid worldgen toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("worldgen references block `{0}` which is not in the registry")]
    MissingBlock(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub flat: Flat,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    /// Surfaces above this line grow grass and trees; below it they turn to sand.
    #[serde(default = "default_tree_line")]
    pub tree_line: i32,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub detail: Detail,
    #[serde(default)]
    pub sand: Sand,
    #[serde(default)]
    pub trees: Trees,
    #[serde(default)]
    pub blocks: SurfaceBlocks,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            mode: Mode::default(),
            flat: Flat::default(),
            sea_level: default_sea_level(),
            tree_line: default_tree_line(),
            height: Height::default(),
            detail: Detail::default(),
            sand: Sand::default(),
            trees: Trees::default(),
            blocks: SurfaceBlocks::default(),
        }
    }
}

impl WorldGenConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, WorldGenError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, WorldGenError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Flat world of the given thickness; handy for tests and demos.
    pub fn flat(thickness: i32) -> Self {
        Self {
            mode: Mode::Flat,
            flat: Flat { thickness },
            ..Self::default()
        }
    }
}

fn default_seed() -> i32 {
    1337
}
fn default_sea_level() -> i32 {
    64
}
fn default_tree_line() -> i32 {
    66
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Flat,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Flat {
    #[serde(default = "default_flat_thickness")]
    pub thickness: i32,
}
fn default_flat_thickness() -> i32 {
    12
}
impl Default for Flat {
    fn default() -> Self {
        Self {
            thickness: default_flat_thickness(),
        }
    }
}

/// Surface height: `fractal(octaves, x + warp*n1, z + warp*n2) * scale + base`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Height {
    pub noise: NoiseParams,
    pub octaves: u32,
    pub scale: f32,
    pub base: f32,
    pub warp: f32,
}
impl Default for Height {
    fn default() -> Self {
        Self {
            noise: NoiseParams::HEIGHT,
            octaves: 14,
            scale: 26.0,
            base: 70.0,
            warp: 80.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Detail {
    pub noise: NoiseParams,
    pub octaves: u32,
}
impl Default for Detail {
    fn default() -> Self {
        Self {
            noise: NoiseParams::DETAIL,
            octaves: 8,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Sand {
    pub noise: NoiseParams,
    pub scale: f32,
}
impl Default for Sand {
    fn default() -> Self {
        Self {
            noise: NoiseParams::SAND,
            scale: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TreePlacement {
    /// Leaves past the chunk edge are written straight into the neighbor's storage.
    #[default]
    Spill,
    /// Each chunk re-plans nearby trees and keeps only its own blocks.
    Staged,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    #[serde(default = "default_tree_chance")]
    pub chance: f32,
    #[serde(default)]
    pub placement: TreePlacement,
}
fn default_tree_chance() -> f32 {
    0.008
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            chance: default_tree_chance(),
            placement: TreePlacement::default(),
        }
    }
}

/// Registry names used by the generator.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SurfaceBlocks {
    pub grass: String,
    pub dirt: String,
    pub stone: String,
    pub water: String,
    pub sand: String,
    pub log: String,
    pub leaves: String,
}
impl Default for SurfaceBlocks {
    fn default() -> Self {
        Self {
            grass: "grass".into(),
            dirt: "dirt".into(),
            stone: "stone".into(),
            water: "water".into(),
            sand: "sand".into(),
            log: "log".into(),
            leaves: "leaves".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = WorldGenConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.sea_level, 64);
        assert_eq!(cfg.tree_line, 66);
        assert_eq!(cfg.mode, Mode::Normal);
        assert_eq!(cfg.height.noise, NoiseParams::HEIGHT);
        assert_eq!(cfg.trees.placement, TreePlacement::Spill);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = WorldGenConfig::from_toml_str(
            r#"
            seed = 9
            [height]
            octaves = 4
            [trees]
            placement = "staged"
        "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.height.octaves, 4);
        assert_eq!(cfg.height.scale, 26.0);
        assert_eq!(cfg.trees.placement, TreePlacement::Staged);
        assert_eq!(cfg.trees.chance, 0.008);
    }
}
