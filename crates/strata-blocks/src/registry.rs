use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::{BlockDef, BlocksConfig};
use crate::types::{AIR, AtlasOffset, BlockDescriptor, BlockFlags, BlockId};

const BUILTIN_BLOCKS: &str = include_str!("../../../assets/blocks.toml");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read block registry: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid block registry toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("block `{0}` is defined twice")]
    DuplicateName(String),
    #[error("block `{block}` has unknown flag `{flag}`")]
    UnknownFlag { block: String, flag: String },
    #[error("block `{block}` uses tile {tile:?} outside a {atlas_size}x{atlas_size} atlas")]
    TileOutOfAtlas {
        block: String,
        tile: [u8; 2],
        atlas_size: u32,
    },
    #[error("registry holds {0} blocks; at most 255 fit in a block id")]
    TooManyBlocks(usize),
    #[error("atlas size must be non-zero")]
    EmptyAtlas,
}

/// Ordered block table. Identifier `n` maps to `blocks[n - 1]`.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockDescriptor>,
    pub atlas_size: u32,
    by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    /// Registry shipped with the engine (`assets/blocks.toml`).
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml_str(BUILTIN_BLOCKS)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(text)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        if cfg.atlas_size == 0 {
            return Err(RegistryError::EmptyAtlas);
        }
        if cfg.blocks.len() > BlockId::MAX as usize {
            return Err(RegistryError::TooManyBlocks(cfg.blocks.len()));
        }
        let mut blocks = Vec::with_capacity(cfg.blocks.len());
        let mut by_name = HashMap::with_capacity(cfg.blocks.len());
        for (i, def) in cfg.blocks.iter().enumerate() {
            let desc = compile_block(def, cfg.atlas_size)?;
            let id = (i + 1) as BlockId;
            if by_name.insert(desc.name.clone(), id).is_some() {
                return Err(RegistryError::DuplicateName(desc.name));
            }
            blocks.push(desc);
        }
        Ok(Self {
            blocks,
            atlas_size: cfg.atlas_size,
            by_name,
        })
    }

    /// Descriptor for a non-air id; `None` for air and unknown ids.
    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockDescriptor> {
        if id == AIR {
            return None;
        }
        self.blocks.get(id as usize - 1)
    }

    /// Flags of `id`; air and unknown ids have none.
    #[inline]
    pub fn flags(&self, id: BlockId) -> BlockFlags {
        self.get(id).map(|b| b.flags).unwrap_or_default()
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Size of one atlas cell in UV units.
    #[inline]
    pub fn tile_uv(&self) -> f32 {
        1.0 / self.atlas_size as f32
    }
}

fn compile_block(def: &BlockDef, atlas_size: u32) -> Result<BlockDescriptor, RegistryError> {
    let mut flags = BlockFlags::empty();
    for name in &def.flags {
        let flag = BlockFlags::from_name(&name.to_ascii_uppercase()).ok_or_else(|| {
            RegistryError::UnknownFlag {
                block: def.name.clone(),
                flag: name.clone(),
            }
        })?;
        flags |= flag;
    }
    let tiles = def.face_tiles();
    let mut textures = [AtlasOffset::default(); 6];
    for (slot, tile) in textures.iter_mut().zip(tiles) {
        if tile[0] as u32 >= atlas_size || tile[1] as u32 >= atlas_size {
            return Err(RegistryError::TileOutOfAtlas {
                block: def.name.clone(),
                tile,
                atlas_size,
            });
        }
        *slot = AtlasOffset::from_tile(tile[0], tile[1], atlas_size);
    }
    Ok(BlockDescriptor {
        name: def.name.clone(),
        textures,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_is_one_based() {
        let reg = BlockRegistry::builtin().unwrap();
        assert_eq!(reg.len(), 7);
        assert!(reg.get(AIR).is_none());
        assert_eq!(reg.get(1).unwrap().name, "grass");
        assert_eq!(reg.id_by_name("sand"), Some(7));
        assert!(reg.get(8).is_none());
    }

    #[test]
    fn air_has_no_flags() {
        let reg = BlockRegistry::builtin().unwrap();
        assert_eq!(reg.flags(AIR), BlockFlags::empty());
    }
}
