//! Deterministic simulation core for a tile-matching puzzle game: a
//! rectangular grid of colored tiles, run detection, gravity-driven
//! collapse, adjacency-constrained swapping, and power tiles.
//!
//! The core is headless. Presentation drains each cell's event queue to
//! animate, and never mutates simulation state outside the documented
//! operations.

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use grid::*;
pub use session::*;
pub use spawner::*;
pub use tile::*;
pub use types::*;

mod cell;
mod error;
mod grid;
mod session;
mod spawner;
mod tile;
mod types;

#[cfg(test)]
pub(crate) mod testutil;

/// Construction parameters for a [`Grid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub size: (Coord, Coord),
}

impl GridConfig {
    pub const fn new_unchecked(size: (Coord, Coord)) -> Self {
        Self { size }
    }

    /// Normalized config; degenerate sizes are clamped to one cell.
    pub fn new((width, height): (Coord, Coord)) -> Self {
        if width < 1 || height < 1 {
            log::warn!("degenerate board size ({width}, {height}), clamping");
        }
        Self::new_unchecked((width.max(1), height.max(1)))
    }

    pub const fn cell_count(&self) -> i64 {
        self.size.0 as i64 * self.size.1 as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_degenerate_sizes() {
        assert_eq!(GridConfig::new((0, -3)).size, (1, 1));
        assert_eq!(GridConfig::new((10, 8)).size, (10, 8));
        assert_eq!(GridConfig::new((10, 8)).cell_count(), 80);
    }
}
