use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell knows about its surroundings once the board is set up.
///
/// A trap cell carries [`Adjacency::Trap`] rather than a count, so it can
/// never be mistaken for a cell with no adjacent traps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjacency {
    Count(u8),
    Trap,
}

impl Default for Adjacency {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// One position on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    revealed: bool,
    trap: bool,
    adjacency: Adjacency,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            revealed: false,
            trap: false,
            adjacency: Adjacency::Count(0),
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn column(&self) -> Coord {
        self.coords.0
    }

    pub const fn row(&self) -> Coord {
        self.coords.1
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_trap(&self) -> bool {
        self.trap
    }

    pub const fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// Number of trapped neighbors, `None` when this cell is a trap itself.
    pub const fn adjacent_trap_count(&self) -> Option<u8> {
        match self.adjacency {
            Adjacency::Count(count) => Some(count),
            Adjacency::Trap => None,
        }
    }

    /// Hidden cells collapse to [`CellView::Hidden`] so nothing about their
    /// content reaches the display.
    pub const fn view(&self) -> CellView {
        if !self.revealed {
            return CellView::Hidden;
        }
        match self.adjacency {
            Adjacency::Trap => CellView::Trap,
            Adjacency::Count(0) => CellView::Empty,
            Adjacency::Count(count) => CellView::Number(count),
        }
    }

    pub(crate) fn set_trap(&mut self) {
        self.trap = true;
    }

    pub(crate) fn set_adjacency(&mut self, adjacency: Adjacency) {
        self.adjacency = adjacency;
    }

    /// Returns whether the cell was hidden before this call.
    pub(crate) fn mark_revealed(&mut self) -> bool {
        !core::mem::replace(&mut self.revealed, true)
    }
}

/// Rendering state handed to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Empty,
    Number(u8),
    Trap,
}

impl CellView {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
