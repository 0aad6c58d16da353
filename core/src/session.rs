use std::collections::VecDeque;
use std::mem;

use crate::spawner::{RandomSpawner, TileSpawner};
use crate::{Grid, GridConfig, Pos};

/// What a single tick accomplished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A presentation animation is still in flight; nothing ran.
    Skipped,
    /// Gravity moved or spawned tiles; matching waits for the next tick.
    Settling,
    /// A destroy pass cleared cells.
    Cleared { destroyed: usize, combo: u32 },
    /// Nothing to do.
    Idle,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Skipped => false,
            Self::Settling => true,
            Self::Cleared { .. } => true,
            Self::Idle => false,
        }
    }
}

/// Owns one play session's grid and drives it with the fixed tick protocol:
/// in-flight animations backpressure the simulation, falls run to rest
/// before matching, and queued power consumptions apply just before the
/// destroy pass.
#[derive(Clone, Debug)]
pub struct Session<S = RandomSpawner> {
    grid: Grid<S>,
    combo: u32,
    pending_powers: VecDeque<Pos>,
    swapped: Vec<Pos>,
}

impl Session<RandomSpawner> {
    pub fn new(config: GridConfig, seed: u64) -> Self {
        Self::with_grid(Grid::new(config, seed))
    }
}

impl<S: TileSpawner> Session<S> {
    pub fn with_grid(grid: Grid<S>) -> Self {
        Self {
            grid,
            combo: 0,
            pending_powers: VecDeque::new(),
            swapped: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid<S> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<S> {
        &mut self.grid
    }

    pub const fn combo(&self) -> u32 {
        self.combo
    }

    pub fn has_moves(&self) -> bool {
        self.grid.any_move_valid()
    }

    /// Player swap between two orthogonally adjacent cells. An accepted swap
    /// arms the swapped pair for upgrade placement and resets the combo.
    pub fn try_swap(&mut self, from: Pos, to: Pos) -> bool {
        let delta = from - to;
        if delta.x.abs() + delta.y.abs() != 1 {
            return false;
        }
        if !self.grid.swap(from, to) {
            return false;
        }

        self.swapped.clear();
        self.swapped.extend([from, to]);
        self.combo = 0;
        true
    }

    /// Queue a power tile for consumption. The driver calls this when it
    /// drains a [`crate::CellEvent::PowerSpanner`] or
    /// [`crate::CellEvent::PowerTimer`] event.
    pub fn consume_power(&mut self, pos: Pos) {
        self.pending_powers.push_back(pos);
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, animating: bool, overheating: bool) -> TickOutcome {
        if animating {
            return TickOutcome::Skipped;
        }

        if self.grid.fall(overheating) {
            return TickOutcome::Settling;
        }

        while let Some(pos) = self.pending_powers.pop_front() {
            if let Some(cell) = self.grid.cell_mut(pos) {
                cell.empty(true);
            }
        }

        let swapped = mem::take(&mut self.swapped);
        let destroyed = self.grid.destroy(&swapped);
        if destroyed > 0 {
            self.combo += 1;
            TickOutcome::Cleared {
                destroyed,
                combo: self.combo,
            }
        } else {
            TickOutcome::Idle
        }
    }
}
