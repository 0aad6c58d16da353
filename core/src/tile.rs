use serde::{Deserialize, Serialize};

/// Full color set a tile can carry. `Empty` is the "no tile" sentinel.
/// `Bomb` exists in the set but is never produced or consumed by the
/// simulation itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Empty,
    Blue,
    Green,
    Yellow,
    Red,
    Purple,
    Bomb,
    Spanner,
    Timer,
}

impl Color {
    /// The colors base spawning draws from. Power colors are never spawned.
    pub const BASE: [Color; 5] = [
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Red,
        Color::Purple,
    ];

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_base(self) -> bool {
        matches!(
            self,
            Self::Blue | Self::Green | Self::Yellow | Self::Red | Self::Purple
        )
    }

    /// Spanner and Timer trigger a side effect when swapped, match or not.
    pub const fn is_power(self) -> bool {
        matches!(self, Self::Spanner | Self::Timer)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::Empty
    }
}

/// Immutable color-tagged value held by a cell. Tiles are replaced whole,
/// never edited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    color: Color,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        color: Color::Empty,
    };

    pub const fn new(color: Color) -> Self {
        Self { color }
    }

    pub const fn color(self) -> Color {
        self.color
    }

    pub const fn is_empty(self) -> bool {
        self.color.is_empty()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::EMPTY
    }
}
