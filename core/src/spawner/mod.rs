use crate::{Color, Tile};

pub use random::*;

mod random;

/// Source of freshly spawned tiles. Implemented over a seeded RNG for play;
/// tests supply fixed sequences instead.
pub trait TileSpawner {
    /// A new base-colored tile, or the empty tile while the machine is
    /// overheating. The overheat branch must stay side-effect-free: it never
    /// touches RNG state.
    fn spawn_base(&mut self, overheating: bool) -> Tile;

    /// Wrap `color` into a tile. Used only for Spanner/Timer placement.
    fn spawn_upgrade(&self, color: Color) -> Tile {
        Tile::new(color)
    }
}
