use core::fmt;
use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = i32;

/// Two-dimensional grid coordinate `(x, y)`, with `(0, 0)` at the bottom
/// left, x growing rightward and y growing upward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: Coord,
    pub y: Coord,
}

impl Pos {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }
}

impl From<(Coord, Coord)> for Pos {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
