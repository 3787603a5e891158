//! Initial roster sampling on reset.

use crate::agent::Agent;
use ant_core::{Heading, PlacementConfig, PlacementStrategy, Position, ResetConfig};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::TAU;

/// How a reset's placement went.
///
/// `placed < requested` is a degraded success: scattered placement ran out of
/// retries before finding enough free cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub requested: usize,
    pub placed: usize,
    /// Rejected samples consumed from the retry budget
    pub retries_used: u32,
}

impl PlacementOutcome {
    pub fn is_complete(&self) -> bool {
        self.placed >= self.requested
    }

    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.placed)
    }
}

/// Build the initial roster for a reset
pub fn place_agents(
    reset: &ResetConfig,
    config: &PlacementConfig,
    rng: &mut ChaCha8Rng,
) -> (Vec<Agent>, PlacementOutcome) {
    let requested = reset.clamped_agent_count();

    match reset.strategy {
        PlacementStrategy::Clustered => {
            let agents = place_clustered(requested, rng);
            let outcome = PlacementOutcome {
                requested,
                placed: agents.len(),
                retries_used: 0,
            };
            (agents, outcome)
        }
        PlacementStrategy::Scattered => {
            let (agents, retries_used) = place_scattered(requested, config, rng);
            let outcome = PlacementOutcome {
                requested,
                placed: agents.len(),
                retries_used,
            };
            (agents, outcome)
        }
        PlacementStrategy::Classic => {
            let agents = vec![Agent::new(Position::ORIGIN, Heading::Up)];
            let outcome = PlacementOutcome {
                requested: 1,
                placed: 1,
                retries_used: 0,
            };
            (agents, outcome)
        }
    }
}

/// Every agent at the origin, each with its own random heading
fn place_clustered(count: usize, rng: &mut ChaCha8Rng) -> Vec<Agent> {
    (0..count)
        .map(|_| Agent::new(Position::ORIGIN, Heading::random(rng)))
        .collect()
}

/// Distinct cells sampled in polar coordinates around the origin.
///
/// The retry budget is shared by the whole reset: every rejected sample
/// consumes one retry, and placement stops early once it is spent.
fn place_scattered(
    count: usize,
    config: &PlacementConfig,
    rng: &mut ChaCha8Rng,
) -> (Vec<Agent>, u32) {
    let mut occupied: HashSet<Position> = HashSet::with_capacity(count);
    let mut agents = Vec::with_capacity(count);
    let mut retries_used = 0u32;

    while agents.len() < count {
        let angle = rng.gen_range(0.0..TAU);
        let radius = rng.gen_range(0..=config.scatter_radius);
        let pos = polar_cell(angle, radius);

        if occupied.insert(pos) {
            agents.push(Agent::new(pos, Heading::random(rng)));
        } else if retries_used == config.retry_budget {
            break;
        } else {
            retries_used += 1;
        }
    }

    (agents, retries_used)
}

/// Project a polar sample onto the nearest grid cell
pub fn polar_cell(angle: f64, radius: i64) -> Position {
    let r = radius as f64;
    Position::new((r * angle.cos()).round() as i64, (r * angle.sin()).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ant_core::SpawnVariant;
    use rand::SeedableRng;

    fn reset(agent_count: i64, strategy: PlacementStrategy) -> ResetConfig {
        ResetConfig {
            agent_count,
            strategy,
            max_agents: 0,
            spawn_variant: SpawnVariant::PerCollision,
        }
    }

    #[test]
    fn test_clustered_all_at_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let (agents, outcome) = place_agents(
            &reset(25, PlacementStrategy::Clustered),
            &PlacementConfig::default(),
            &mut rng,
        );
        assert_eq!(agents.len(), 25);
        assert!(outcome.is_complete());
        assert!(agents.iter().all(|a| a.position == Position::ORIGIN));
    }

    #[test]
    fn test_count_clamping() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = PlacementConfig::default();

        for (requested, expected) in [(-5, 1), (0, 1), (500, 100)] {
            let (agents, outcome) =
                place_agents(&reset(requested, PlacementStrategy::Clustered), &config, &mut rng);
            assert_eq!(agents.len(), expected);
            assert_eq!(outcome.requested, expected);
        }
    }

    #[test]
    fn test_scattered_cells_are_unique() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let (agents, outcome) = place_agents(
            &reset(100, PlacementStrategy::Scattered),
            &PlacementConfig::default(),
            &mut rng,
        );

        let cells: HashSet<Position> = agents.iter().map(|a| a.position).collect();
        assert_eq!(cells.len(), agents.len());
        assert_eq!(outcome.placed, agents.len());
        assert!(agents
            .iter()
            .all(|a| a.position.x.abs() <= 20 && a.position.y.abs() <= 20));
    }

    #[test]
    fn test_scattered_budget_exhaustion_is_reported() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = PlacementConfig {
            scatter_radius: 0,
            retry_budget: 10,
        };
        let (agents, outcome) =
            place_agents(&reset(5, PlacementStrategy::Scattered), &config, &mut rng);

        // Radius 0 only ever yields the origin
        assert_eq!(agents.len(), 1);
        assert_eq!(outcome.requested, 5);
        assert_eq!(outcome.placed, 1);
        assert_eq!(outcome.retries_used, 10);
        assert!(!outcome.is_complete());
        assert_eq!(outcome.shortfall(), 4);
    }

    #[test]
    fn test_scattered_budget_is_shared_across_agents() {
        // Radius 1 reaches the origin and its eight neighbours; the tenth
        // agent can never be placed, and the shared budget ends the reset.
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = PlacementConfig {
            scatter_radius: 1,
            retry_budget: 50,
        };
        let (agents, outcome) =
            place_agents(&reset(10, PlacementStrategy::Scattered), &config, &mut rng);

        assert!(agents.len() <= 9);
        assert_eq!(outcome.retries_used, 50);
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_scattered_accepted_samples_are_free() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = PlacementConfig {
            scatter_radius: 0,
            retry_budget: 0,
        };
        let (agents, outcome) =
            place_agents(&reset(1, PlacementStrategy::Scattered), &config, &mut rng);

        assert_eq!(agents.len(), 1);
        assert_eq!(outcome.retries_used, 0);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_classic_single_agent() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let (agents, outcome) = place_agents(
            &reset(40, PlacementStrategy::Classic),
            &PlacementConfig::default(),
            &mut rng,
        );
        assert_eq!(agents, vec![Agent::at(0, 0, Heading::Up)]);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_polar_cell_projection() {
        assert_eq!(polar_cell(0.0, 0), Position::ORIGIN);
        assert_eq!(polar_cell(0.0, 5), Position::new(5, 0));
        assert_eq!(polar_cell(std::f64::consts::FRAC_PI_2, 3), Position::new(0, 3));
        assert_eq!(polar_cell(std::f64::consts::PI, 4), Position::new(-4, 0));
    }
}
