//! Read-only views of simulation state for renderers and logging.

use crate::agent::Agent;
use ant_core::{Cell, Position};
use serde::{Deserialize, Serialize};

/// A visited cell as `(x, y, value)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub x: i64,
    pub y: i64,
    pub value: u8,
}

impl From<(Position, Cell)> for CellRecord {
    fn from((pos, cell): (Position, Cell)) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            value: cell.value(),
        }
    }
}

/// An agent as `(x, y, heading)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub x: i64,
    pub y: i64,
    pub heading: u8,
}

impl From<&Agent> for AgentRecord {
    fn from(agent: &Agent) -> Self {
        Self {
            x: agent.position.x,
            y: agent.position.y,
            heading: agent.heading.code(),
        }
    }
}

/// Whole-world copy taken between ticks.
///
/// Cells are sorted by position so equal worlds give equal snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub cells: Vec<CellRecord>,
    pub agents: Vec<AgentRecord>,
}

/// Aggregate counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub tick: u64,
    pub population: usize,
    pub visited_cells: usize,
    pub black_cells: usize,
    pub total_spawned: u64,
    pub total_collisions: u64,
    /// Present only for the capped spawn variant
    pub spawn_radius: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ant_core::Heading;

    #[test]
    fn test_records_use_numeric_codes() {
        let cell = CellRecord::from((Position::new(-2, 3), Cell::Black));
        assert_eq!(cell, CellRecord { x: -2, y: 3, value: 1 });

        let agent = AgentRecord::from(&Agent::at(4, -1, Heading::Left));
        assert_eq!(agent, AgentRecord { x: 4, y: -1, heading: 3 });
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = WorldSnapshot {
            tick: 3,
            cells: vec![CellRecord { x: 0, y: 0, value: 1 }],
            agents: vec![AgentRecord { x: 1, y: 0, heading: 1 }],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
