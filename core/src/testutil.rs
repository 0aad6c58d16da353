use crate::spawner::TileSpawner;
use crate::{Color, Grid, Tile};

/// Spawner cycling through a fixed color sequence, for deterministic boards.
pub(crate) struct CycleSpawner {
    colors: Vec<Color>,
    next: usize,
}

impl CycleSpawner {
    pub(crate) fn new(colors: &[Color]) -> Self {
        assert!(!colors.is_empty());
        Self {
            colors: colors.to_vec(),
            next: 0,
        }
    }
}

impl TileSpawner for CycleSpawner {
    fn spawn_base(&mut self, overheating: bool) -> Tile {
        if overheating {
            return Tile::EMPTY;
        }
        let color = self.colors[self.next % self.colors.len()];
        self.next += 1;
        Tile::new(color)
    }
}

fn color_of(c: char) -> Color {
    match c {
        '.' => Color::Empty,
        'B' => Color::Blue,
        'G' => Color::Green,
        'Y' => Color::Yellow,
        'R' => Color::Red,
        'P' => Color::Purple,
        'S' => Color::Spanner,
        'T' => Color::Timer,
        'O' => Color::Bomb,
        _ => panic!("unknown color char {c:?}"),
    }
}

/// Board from character rows, top row first. Refills cycle through
/// blue/green/yellow.
pub(crate) fn board(rows: &[&str]) -> Grid<CycleSpawner> {
    let parsed: Vec<Vec<Color>> = rows
        .iter()
        .map(|row| row.chars().map(color_of).collect())
        .collect();
    let refs: Vec<&[Color]> = parsed.iter().map(Vec::as_slice).collect();
    let spawner = CycleSpawner::new(&[Color::Blue, Color::Green, Color::Yellow]);
    Grid::from_rows(&refs, spawner).expect("test layout should be rectangular")
}

/// Column-major color snapshot, for before/after comparisons.
pub(crate) fn colors<S: TileSpawner>(grid: &Grid<S>) -> Vec<Color> {
    grid.cells().map(|cell| cell.color()).collect()
}
