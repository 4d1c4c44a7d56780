use std::fs;
use std::path::Path;

use serde::Deserialize;
use strata_runtime::RenderConfig;
use strata_world::WorldGenConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level `strata.toml`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StrataConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub worldgen: WorldGenConfig,
}

impl StrataConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_world::{Mode, TreePlacement};

    #[test]
    fn sample_config_parses() {
        let cfg = StrataConfig::from_toml_str(include_str!("../strata.toml")).unwrap();
        assert_eq!(cfg.render.render_distance, 12);
        assert_eq!(cfg.render.max_resorts_per_update, 2);
        assert_eq!(cfg.worldgen.seed, 1337);
        assert_eq!(cfg.worldgen.mode, Mode::Normal);
        assert_eq!(cfg.worldgen.trees.placement, TreePlacement::Spill);
    }

    #[test]
    fn empty_config_is_default() {
        let cfg = StrataConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.render, RenderConfig::default());
        assert_eq!(cfg.worldgen.sea_level, 64);
    }

    #[test]
    fn flat_worldgen_table() {
        let cfg = StrataConfig::from_toml_str(
            r#"
            [worldgen]
            mode = "flat"
            [worldgen.flat]
            thickness = 20
        "#,
        )
        .unwrap();
        assert_eq!(cfg.worldgen.mode, Mode::Flat);
        assert_eq!(cfg.worldgen.flat.thickness, 20);
    }
}
