//! Seeded sessions for scenario tests.

use spritefield::assets::{TextureInfo, TextureRegistry};
use spritefield::config::{DeviceTier, SimConfig};
use spritefield::world::Session;

use crate::levels::HeightGrid;

/// Registry with every sprite the session spawns.
pub fn character_textures() -> TextureRegistry {
    TextureRegistry::new()
        .with("player", TextureInfo { width: 96, height: 128 })
        .with("npc", TextureInfo { width: 96, height: 128 })
        .with("tree", TextureInfo { width: 32, height: 32 })
        .with("bush", TextureInfo { width: 16, height: 16 })
}

/// Low-end session on generated terrain.
///
/// # Panics
/// Panics if the low-end defaults fail validation.
pub fn seeded_session(seed: u64, npcs: usize) -> Session {
    let mut config = SimConfig::for_tier(DeviceTier::LowEnd);
    config.npc.count = npcs;
    Session::new(config, seed, &character_textures())
        .unwrap_or_else(|e| panic!("session setup failed: {e}"))
}

/// Session on a flat `size × size` grid of `height`.
///
/// # Panics
/// Panics when `size` is zero.
pub fn flat_session(size: usize, height: u32, npcs: usize) -> Session {
    let grid = HeightGrid::flat(size, size, height);
    let mut config = grid.config();
    config.npc.count = npcs;
    Session::with_heights(config, grid.field(), 1, &character_textures())
        .unwrap_or_else(|e| panic!("session setup failed: {e}"))
}
