use std::collections::VecDeque;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::{Color, Pos, Tile};

bitflags! {
    /// Per-destroy-pass guard keeping a cell out of more than one run per
    /// axis. Reset at the start of every pass.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct ClearFlags: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL = 0b10;
    }
}

/// Notification pushed from the simulation to whatever animates a cell.
/// Ordering is guaranteed only within one cell's queue, and each event is
/// consumed at most once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellEvent {
    /// The held tile slid to `target` as one half of an accepted swap.
    Slide { target: Pos },
    /// The held tile arrived by falling from `origin`.
    Fall { origin: Pos },
    /// The held tile was cleared.
    Destroy,
    /// A spanner was swapped and must be consumed.
    PowerSpanner,
    /// A timer was swapped and must be consumed.
    PowerTimer,
}

/// One slot of the grid: a position fixed at creation, the tile currently
/// held, and the outbound event queue the presentation layer drains.
#[derive(Clone, Debug)]
pub struct Cell {
    position: Pos,
    tile: Tile,
    clear_flags: ClearFlags,
    initialised: bool,
    events: VecDeque<CellEvent>,
}

impl Cell {
    pub(crate) fn new(position: Pos, tile: Tile) -> Self {
        Self {
            position,
            tile,
            clear_flags: ClearFlags::empty(),
            initialised: false,
            events: VecDeque::new(),
        }
    }

    pub const fn position(&self) -> Pos {
        self.position
    }

    pub const fn tile(&self) -> Tile {
        self.tile
    }

    pub const fn color(&self) -> Color {
        self.tile.color()
    }

    /// Exchange held tiles with another cell. The caller validates the move;
    /// no event is emitted.
    pub fn swap(&mut self, other: &mut Cell) {
        core::mem::swap(&mut self.tile, &mut other.tile);
    }

    /// Overwrite the held tile. No event.
    pub fn replace(&mut self, tile: Tile) {
        self.tile = tile;
    }

    /// Overwrite the held tile with another cell's tile. No event.
    pub fn replace_from(&mut self, other: &Cell) {
        self.tile = other.tile;
    }

    /// Overwrite the held tile with a power tile. Visually silent; the
    /// destroy pass around it carries the visual weight.
    pub fn upgrade(&mut self, tile: Tile) {
        self.tile = tile;
    }

    /// Clear the held tile. Resets clear flags; a cell that is already empty
    /// stays silent, so one pass signals a cell at most once.
    pub fn empty(&mut self, notify: bool) {
        self.clear_flags = ClearFlags::empty();
        if self.tile.is_empty() {
            return;
        }
        self.tile = Tile::EMPTY;

        if self.initialised && notify {
            self.events.push_back(CellEvent::Destroy);
        }
    }

    pub fn notify_slide(&mut self, target: Pos) {
        if self.initialised {
            self.events.push_back(CellEvent::Slide { target });
        }
    }

    pub fn notify_fall(&mut self, origin: Pos) {
        if self.initialised {
            self.events.push_back(CellEvent::Fall { origin });
        }
    }

    pub fn notify_spanner(&mut self) {
        if self.initialised {
            self.events.push_back(CellEvent::PowerSpanner);
        }
    }

    pub fn notify_timer(&mut self) {
        if self.initialised {
            self.events.push_back(CellEvent::PowerTimer);
        }
    }

    pub fn set_clear_flag(&mut self, flags: ClearFlags) {
        self.clear_flags |= flags;
    }

    pub fn has_clear_flag(&self, flags: ClearFlags) -> bool {
        self.clear_flags.contains(flags)
    }

    pub(crate) fn reset_clear_flags(&mut self) {
        self.clear_flags = ClearFlags::empty();
    }

    pub(crate) fn set_initialised(&mut self) {
        self.initialised = true;
    }

    /// Pop the oldest pending event. Single consumer.
    pub fn pop_event(&mut self) -> Option<CellEvent> {
        self.events.pop_front()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}
