//! Agent state and the turning rule.

use crate::grid::Grid;
use ant_core::{Cell, Heading, Position};
use serde::{Deserialize, Serialize};

/// An ant on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Agent {
    pub position: Position,
    pub heading: Heading,
}

impl Agent {
    pub fn new(position: Position, heading: Heading) -> Self {
        Self { position, heading }
    }

    pub fn at(x: i64, y: i64, heading: Heading) -> Self {
        Self::new(Position::new(x, y), heading)
    }

    /// Apply one step of the turning rule.
    ///
    /// On a white cell turn clockwise, on a black cell turn counter-clockwise;
    /// flip the cell, then move one unit along the new heading.
    pub fn step(&mut self, grid: &mut Grid) {
        let previous = grid.toggle(self.position);
        self.heading = match previous {
            Cell::White => self.heading.clockwise(),
            Cell::Black => self.heading.counter_clockwise(),
        };
        let (dx, dy) = self.heading.to_delta();
        self.position = self.position.offset(dx, dy);
    }
}
