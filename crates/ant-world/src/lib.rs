//! Langton's-ant swarm simulation engine.
//!
//! Agents walk an unbounded binary grid, flipping the cells they leave.
//! Agents that end a tick on the same cell trigger reproduction under the
//! configured spawn policy.

pub mod agent;
pub mod collision;
pub mod grid;
pub mod placement;
pub mod schedule;
pub mod shared;
pub mod simulation;
pub mod snapshot;
pub mod spawn;

pub use agent::Agent;
pub use collision::{detect_collisions, CollisionGroup};
pub use grid::Grid;
pub use placement::PlacementOutcome;
pub use schedule::{batch_size, run_frame, FrameReport};
pub use shared::SharedSimulation;
pub use simulation::Simulation;
pub use snapshot::{AgentRecord, CellRecord, SimulationStats, WorldSnapshot};
pub use spawn::SpawnPolicy;
