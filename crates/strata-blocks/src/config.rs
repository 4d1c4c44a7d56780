use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct BlocksConfig {
    #[serde(default = "default_atlas_size")]
    pub atlas_size: u32,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

fn default_atlas_size() -> u32 {
    8
}

/// One `[[blocks]]` entry. `tile` applies to every face; `top`, `bottom` and `side`
/// override it for the matching faces.
#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    pub tile: [u8; 2],
    #[serde(default)]
    pub top: Option<[u8; 2]>,
    #[serde(default)]
    pub bottom: Option<[u8; 2]>,
    #[serde(default)]
    pub side: Option<[u8; 2]>,
    #[serde(default)]
    pub flags: Vec<String>,
}

impl BlockDef {
    /// Atlas tile per face in +Y, -Y, +X, -X, +Z, -Z order.
    pub fn face_tiles(&self) -> [[u8; 2]; 6] {
        let side = self.side.unwrap_or(self.tile);
        [
            self.top.unwrap_or(self.tile),
            self.bottom.unwrap_or(self.tile),
            side,
            side,
            side,
            side,
        ]
    }
}
