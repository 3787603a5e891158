//! Sparse, unbounded binary grid.

use ant_core::{Cell, Position};
use std::collections::HashMap;

/// An unbounded grid of binary cells.
///
/// Only visited cells are stored. A cell, once written, stays in the map even
/// when it flips back to `White`, so the visited set only grows until
/// [`Grid::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: HashMap<Position, Cell>,
    black: usize,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get cell at position (`White` if never written)
    pub fn get(&self, pos: Position) -> Cell {
        self.cells.get(&pos).copied().unwrap_or_default()
    }

    /// Set cell at position
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let previous = self.cells.insert(pos, cell).unwrap_or_default();
        self.track(previous, cell);
    }

    /// Flip the cell at position and return its previous value
    pub fn toggle(&mut self, pos: Position) -> Cell {
        let entry = self.cells.entry(pos).or_default();
        let previous = *entry;
        *entry = previous.flipped();
        self.track(previous, previous.flipped());
        previous
    }

    fn track(&mut self, previous: Cell, current: Cell) {
        match (previous, current) {
            (Cell::White, Cell::Black) => self.black += 1,
            (Cell::Black, Cell::White) => self.black -= 1,
            _ => {}
        }
    }

    /// Forget every visited cell
    pub fn clear(&mut self) {
        self.cells.clear();
        self.black = 0;
    }

    /// Number of cells ever written since the last clear
    pub fn visited_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells currently `Black`
    pub fn black_count(&self) -> usize {
        self.black
    }

    /// Iterator over all visited cells with positions.
    ///
    /// Order is unspecified. Each call starts a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().map(|(pos, cell)| (*pos, *cell))
    }
}
