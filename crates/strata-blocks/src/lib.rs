//! Block identifiers, descriptors, and the TOML-driven block registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, RegistryError};
pub use types::{AIR, AtlasOffset, BlockDescriptor, BlockFlags, BlockId, FACE_COUNT};
