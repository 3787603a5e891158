//! Core type definitions for the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer cell coordinate on the unbounded grid.
///
/// Screen-space convention: "up" decreases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Offset by a delta. Wraps at the ends of the `i64` range instead of
    /// panicking, so movement stays total for every coordinate.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Facing direction. The discriminant is the direction code
/// (0=up, 1=right, 2=down, 3=left); +1 is a clockwise quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Heading {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Heading {
    pub fn all() -> [Heading; 4] {
        [Heading::Up, Heading::Right, Heading::Down, Heading::Left]
    }

    /// Build a heading from any direction code, reduced mod 4.
    pub fn from_code(code: u8) -> Self {
        match code % 4 {
            0 => Heading::Up,
            1 => Heading::Right,
            2 => Heading::Down,
            _ => Heading::Left,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn clockwise(self) -> Self {
        Self::from_code(self.code() + 1)
    }

    pub fn counter_clockwise(self) -> Self {
        Self::from_code(self.code() + 3)
    }

    pub fn to_delta(self) -> (i64, i64) {
        match self {
            Heading::Up => (0, -1),
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
        }
    }

    /// Uniformly random heading.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_code(rng.gen_range(0..4))
    }
}

/// Binary cell state. Never-written cells read as `White`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    White = 0,
    Black = 1,
}

impl Cell {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Any nonzero value is treated as `Black`.
    pub fn from_value(value: u8) -> Self {
        if value == 0 {
            Cell::White
        } else {
            Cell::Black
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Cell::White => Cell::Black,
            Cell::Black => Cell::White,
        }
    }
}
