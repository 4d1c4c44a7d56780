use strata_blocks::BlockId;

use crate::coords::WorldPos;

/// Blocks of trunk above (and including) the surface block.
pub const TRUNK_HEIGHT: i32 = 5;
/// How far leaves reach horizontally from the trunk.
pub const LEAF_REACH: i32 = 2;

const LOWER_CORNER_KEEP: f32 = 0.7;
const UPPER_CORNER_KEEP: f32 = 0.75;

#[inline]
fn mix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Hash of an integer world column.
#[inline]
pub fn hash2(ix: i32, iz: i32, seed: u32) -> u32 {
    mix32(
        (ix as u32).wrapping_mul(0x85eb_ca6b)
            ^ (iz as u32).wrapping_mul(0xc2b2_ae35)
            ^ seed.wrapping_mul(0x27d4_eb2d),
    )
}

/// Pseudo-random stream owned by one world column. Two streams for the same column and
/// seed produce the same sequence.
#[derive(Clone, Debug)]
pub struct ColumnRng {
    state: u32,
    counter: u32,
}

impl ColumnRng {
    pub fn for_column(wx: i32, wz: i32, seed: u32) -> Self {
        Self {
            state: hash2(wx, wz, seed),
            counter: 0,
        }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.counter = self.counter.wrapping_add(0x9E37_79B9);
        mix32(self.state ^ self.counter)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() & 0x00FF_FFFF) as f32 / 16_777_216.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeBlock {
    pub pos: WorldPos,
    pub block: BlockId,
}

/// Every block of one tree, in placement order. Later entries win on overlap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreePlan {
    pub root: WorldPos,
    pub blocks: Vec<TreeBlock>,
}

impl TreePlan {
    /// Rolls the column's stream once for the spawn decision, then once per candidate
    /// corner leaf. Returns `None` when the roll fails.
    pub fn roll(
        rng: &mut ColumnRng,
        root: WorldPos,
        chance: f32,
        log: BlockId,
        leaves: BlockId,
    ) -> Option<Self> {
        if rng.next_f32() >= chance {
            return None;
        }
        let mut blocks = Vec::with_capacity(TRUNK_HEIGHT as usize + 50);
        for dy in 0..TRUNK_HEIGHT {
            blocks.push(TreeBlock {
                pos: root.offset(0, dy, 0),
                block: log,
            });
        }

        // Lower tier: 5x5 at trunk top and one above, ragged corners.
        for dx in -LEAF_REACH..=LEAF_REACH {
            for dz in -LEAF_REACH..=LEAF_REACH {
                for dy in 4..6 {
                    if dx == 0 && dz == 0 && dy == 4 {
                        continue;
                    }
                    let corner = dx.abs() == LEAF_REACH && dz.abs() == LEAF_REACH;
                    if corner && rng.next_f32() > LOWER_CORNER_KEEP {
                        continue;
                    }
                    blocks.push(TreeBlock {
                        pos: root.offset(dx, dy, dz),
                        block: leaves,
                    });
                }
            }
        }

        // Upper tier: 3x3, corners thinned on the very top layer only.
        for dx in -1..=1 {
            for dz in -1..=1 {
                for dy in 6..8 {
                    let corner = dx != 0 && dz != 0;
                    if dy == 7 && corner && rng.next_f32() > UPPER_CORNER_KEEP {
                        continue;
                    }
                    blocks.push(TreeBlock {
                        pos: root.offset(dx, dy, dz),
                        block: leaves,
                    });
                }
            }
        }

        Some(Self { root, blocks })
    }
}
