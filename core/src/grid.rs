use ndarray::Array2;
use smallvec::SmallVec;

use crate::spawner::{RandomSpawner, TileSpawner};
use crate::{Cell, ClearFlags, Color, Coord, GridConfig, GridError, Pos, Result, Tile};

/// Rectangular board of cells. `(0, 0)` is the bottom-left cell; x grows to
/// the right and y grows upward. Exactly one cell exists per position, and
/// the dimensions are fixed for the grid's lifetime.
#[derive(Clone, Debug)]
pub struct Grid<S = RandomSpawner> {
    cells: Array2<Cell>,
    spawner: S,
}

impl Grid<RandomSpawner> {
    /// Construct and settle a board with the default seeded spawner.
    pub fn new(config: GridConfig, seed: u64) -> Self {
        Self::with_spawner(config, RandomSpawner::new(seed))
    }
}

impl<S: TileSpawner> Grid<S> {
    /// Construct a board and resolve its initial matches. Settling is silent:
    /// cells only start emitting events once it has converged, so the player
    /// never observes spontaneous matches or falls at game start.
    pub fn with_spawner(config: GridConfig, mut spawner: S) -> Self {
        let (width, height) = config.size;
        let cells = Array2::from_shape_fn((width as usize, height as usize), |(x, y)| {
            Cell::new(
                Pos::new(x as Coord, y as Coord),
                spawner.spawn_base(false),
            )
        });

        let mut grid = Self { cells, spawner };
        grid.settle();
        for cell in grid.cells.iter_mut() {
            cell.set_initialised();
        }
        grid
    }

    /// Build a board from explicit rows of colors, top row first. The board
    /// is taken as given: no settling, cells immediately live.
    pub fn from_rows(rows: &[&[Color]], spawner: S) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if width == 0 || height == 0 {
            return Err(GridError::EmptyLayout);
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(GridError::RaggedLayout);
        }

        let cells = Array2::from_shape_fn((width, height), |(x, y)| {
            let color = rows[height - 1 - y][x];
            let mut cell = Cell::new(Pos::new(x as Coord, y as Coord), Tile::new(color));
            cell.set_initialised();
            cell
        });
        Ok(Self { cells, spawner })
    }

    fn settle(&mut self) {
        self.destroy(&[]);
        let mut passes = 0u32;
        while self.fall(false) {
            self.destroy(&[]);
            passes += 1;
        }
        log::trace!("board settled after {passes} fall passes");
    }

    pub fn size(&self) -> (Coord, Coord) {
        let (width, height) = self.cells.dim();
        (width as Coord, height as Coord)
    }

    pub fn config(&self) -> GridConfig {
        GridConfig::new_unchecked(self.size())
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        let (width, height) = self.size();
        pos.x >= 0 && pos.y >= 0 && pos.x < width && pos.y < height
    }

    /// Cell at `pos`, or `None` out of bounds. Lookups never fault.
    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.in_bounds(pos)
            .then(|| &self.cells[[pos.x as usize, pos.y as usize]])
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.in_bounds(pos)
            .then(|| &mut self.cells[[pos.x as usize, pos.y as usize]])
    }

    /// All cells in column-major order: column 0 bottom to top, then
    /// column 1, and so on.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    fn at(&self, pos: Pos) -> &Cell {
        &self.cells[[pos.x as usize, pos.y as usize]]
    }

    fn at_mut(&mut self, pos: Pos) -> &mut Cell {
        &mut self.cells[[pos.x as usize, pos.y as usize]]
    }

    fn color_at(&self, pos: Pos) -> Option<Color> {
        self.cell(pos).map(Cell::color)
    }

    /// Mutable access to two distinct cells at once.
    fn cells_pair_mut(&mut self, a: Pos, b: Pos) -> (&mut Cell, &mut Cell) {
        debug_assert!(self.in_bounds(a) && self.in_bounds(b) && a != b);
        let (_, height) = self.size();
        let ia = a.x as usize * height as usize + a.y as usize;
        let ib = b.x as usize * height as usize + b.y as usize;

        let slice = self
            .cells
            .as_slice_mut()
            .expect("layout should be standard");
        if ia < ib {
            let (lo, hi) = slice.split_at_mut(ib);
            (&mut lo[ia], &mut hi[0])
        } else {
            let (lo, hi) = slice.split_at_mut(ia);
            (&mut hi[0], &mut lo[ib])
        }
    }

    /// One downward gravity step. Returns whether anything moved; callers
    /// repeat until it reports no change. While overheating the spawner
    /// yields empty tiles for top-row refills, and those refills queue a
    /// Fall event without counting as change.
    pub fn fall(&mut self, is_overheat_active: bool) -> bool {
        let (width, height) = self.size();
        let mut changed = false;

        for x in 0..width {
            for y in 1..height {
                let at = Pos::new(x, y);
                let below = Pos::new(x, y - 1);

                if !self.at(at).color().is_empty() && self.at(below).color().is_empty() {
                    let (src, dst) = self.cells_pair_mut(at, below);
                    dst.replace_from(src);
                    src.empty(false);
                    dst.notify_fall(at);
                    changed = true;
                }

                // Top of the column: nothing above to fall in, ask the spawner.
                if y == height - 1 && self.at(at).color().is_empty() {
                    let fresh = self.spawner.spawn_base(is_overheat_active);
                    let cell = self.at_mut(at);
                    cell.replace(fresh);
                    cell.notify_fall(at + Pos::new(0, 1));
                    if !is_overheat_active {
                        changed = true;
                    }
                }
            }
        }

        changed
    }

    /// Swap the tiles at `from` and `to` if the move produces a run or moves
    /// a power tile. On rejection the board is restored untouched and no
    /// event is emitted.
    pub fn swap(&mut self, from: Pos, to: Pos) -> bool {
        if from == to {
            return false;
        }
        let (a_color, b_color) = match (self.color_at(from), self.color_at(to)) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };
        if a_color.is_empty() || b_color.is_empty() {
            return false;
        }

        {
            let (a, b) = self.cells_pair_mut(from, to);
            a.swap(b);
        }
        // colors as seen after the exchange
        let (from_color, to_color) = (b_color, a_color);

        if self.is_valid_move(from)
            || self.is_valid_move(to)
            || from_color.is_power()
            || to_color.is_power()
        {
            let (a, b) = self.cells_pair_mut(from, to);
            a.notify_slide(to);
            b.notify_slide(from);

            if from_color == Color::Spanner {
                a.notify_spanner();
            }
            if to_color == Color::Spanner {
                b.notify_spanner();
            }
            if from_color == Color::Timer {
                a.notify_timer();
            }
            if to_color == Color::Timer {
                b.notify_timer();
            }
            log::debug!("swap {from} <-> {to} accepted");
            return true;
        }

        let (a, b) = self.cells_pair_mut(from, to);
        a.swap(b); // unswap
        log::debug!("swap {from} <-> {to} rejected");
        false
    }

    /// Whether the tile at `at` sits in a run of three identical colors in
    /// any axis-aligned window of length three around it.
    pub fn is_valid_move(&self, at: Pos) -> bool {
        for d in -2..=2 {
            let a = self.color_at(at + Pos::new(d, 0));
            let b = self.color_at(at + Pos::new(d + 1, 0));
            let c = self.color_at(at + Pos::new(d + 2, 0));
            if Self::matching_window(a, b, c) {
                return true;
            }
        }

        for d in -2..=2 {
            let a = self.color_at(at + Pos::new(0, d));
            let b = self.color_at(at + Pos::new(0, d + 1));
            let c = self.color_at(at + Pos::new(0, d + 2));
            if Self::matching_window(a, b, c) {
                return true;
            }
        }

        false
    }

    fn matching_window(a: Option<Color>, b: Option<Color>, c: Option<Color>) -> bool {
        match (a, b, c) {
            (Some(a), Some(b), Some(c)) => {
                !a.is_empty() && !b.is_empty() && !c.is_empty() && a == b && b == c
            }
            _ => false,
        }
    }

    /// Whether any cell currently sits in a run of three. Used to detect a
    /// board with no remaining matches.
    pub fn any_move_valid(&self) -> bool {
        let (width, height) = self.size();
        for x in 0..width {
            for y in 0..height {
                if self.is_valid_move(Pos::new(x, y)) {
                    return true;
                }
            }
        }
        false
    }

    /// Cells of the maximal same-colored run from `start` along `step`,
    /// `start` included.
    fn grow_run(&self, start: Pos, color: Color, step: Pos) -> SmallVec<[Pos; 8]> {
        let mut run: SmallVec<[Pos; 8]> = SmallVec::new();
        run.push(start);

        let mut next = start + step;
        while self.color_at(next) == Some(color) {
            run.push(next);
            next = next + step;
        }
        run
    }

    /// One match-clearing pass. Runs of three or more are cleared; a run of
    /// four leaves a Spanner behind, a run of five or more a Timer, at most
    /// one upgrade per run. `swapped` names the two cells of the triggering
    /// swap so the upgrade lands on one of them when possible. Returns the
    /// number of cells cleared, counted per run membership.
    pub fn destroy(&mut self, swapped: &[Pos]) -> usize {
        let (width, height) = self.size();

        for cell in self.cells.iter_mut() {
            cell.reset_clear_flags();
        }

        let mut count = 0;
        let mut all_cleared: Vec<Pos> = Vec::new();

        for x in 0..width {
            for y in 0..height {
                let at = Pos::new(x, y);
                if !self.is_valid_move(at) {
                    continue;
                }
                let color = self.at(at).color();
                if color.is_empty() {
                    continue;
                }

                let mut cleared: SmallVec<[Pos; 8]> = SmallVec::new();

                let hcount = if self.at(at).has_clear_flag(ClearFlags::HORIZONTAL) {
                    0
                } else {
                    let run = self.grow_run(at, color, Pos::new(1, 0));
                    if run.len() >= 3 {
                        for &pos in &run {
                            self.at_mut(pos).set_clear_flag(ClearFlags::HORIZONTAL);
                            cleared.push(pos);
                        }
                    }
                    run.len()
                };

                let vcount = if self.at(at).has_clear_flag(ClearFlags::VERTICAL) {
                    0
                } else {
                    let run = self.grow_run(at, color, Pos::new(0, 1));
                    if run.len() >= 3 {
                        for &pos in &run {
                            self.at_mut(pos).set_clear_flag(ClearFlags::VERTICAL);
                            cleared.push(pos);
                        }
                    }
                    run.len()
                };

                if cleared.is_empty() {
                    continue;
                }

                let upgrade = if hcount >= 5 || vcount >= 5 {
                    Some(Color::Timer)
                } else if hcount >= 4 || vcount >= 4 {
                    Some(Color::Spanner)
                } else {
                    None
                };

                count += cleared.len();
                log::trace!("run of {} at {at} ({color:?})", cleared.len());

                if let Some(upgrade) = upgrade {
                    // Prefer the first-seen swapped member as the upgrade
                    // target, else the run's first cell.
                    let target = cleared
                        .iter()
                        .copied()
                        .find(|pos| swapped.contains(pos))
                        .unwrap_or(cleared[0]);
                    let tile = self.spawner.spawn_upgrade(upgrade);
                    self.at_mut(target).upgrade(tile);
                }

                all_cleared.extend_from_slice(&cleared);
            }
        }

        for pos in all_cleared {
            let cell = self.at_mut(pos);
            if cell.color().is_power() {
                continue;
            }
            cell.empty(true);
        }

        if count > 0 {
            log::debug!("destroy pass cleared {count} cells");
        }
        count
    }
}
