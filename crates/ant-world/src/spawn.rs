//! Collision-triggered reproduction rules.

use crate::agent::Agent;
use crate::collision::CollisionGroup;
use ant_core::{Heading, Position, SpawnConfig, SpawnVariant};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// State for the capped, single-spawn variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappedSpawn {
    pub radius: i64,
    pub radius_growth: i64,
    /// 0 = unlimited
    pub max_agents: usize,
}

impl CappedSpawn {
    pub fn new(base_radius: i64, radius_growth: i64, max_agents: usize) -> Self {
        Self {
            radius: base_radius,
            radius_growth,
            max_agents,
        }
    }

    pub fn at_capacity(&self, roster_len: usize) -> bool {
        self.max_agents != 0 && roster_len >= self.max_agents
    }
}

/// Turns a tick's collision groups into new agents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// One agent per collision group, uniform in [-extent, extent]²
    PerCollision { extent: i64 },
    /// At most one agent per tick, uniform in [-r, r]²; r grows after each spawn
    CappedSingle(CappedSpawn),
    /// Never spawn
    Disabled,
}

impl SpawnPolicy {
    /// Build a policy in its initial state
    pub fn from_config(variant: SpawnVariant, config: &SpawnConfig, max_agents: usize) -> Self {
        match variant {
            SpawnVariant::PerCollision => SpawnPolicy::PerCollision {
                extent: config.per_collision_extent,
            },
            SpawnVariant::CappedSingle => SpawnPolicy::CappedSingle(CappedSpawn::new(
                config.base_radius,
                config.radius_growth,
                max_agents,
            )),
            SpawnVariant::Disabled => SpawnPolicy::Disabled,
        }
    }

    /// Current spawn radius, for policies that have one
    pub fn radius(&self) -> Option<i64> {
        match self {
            SpawnPolicy::CappedSingle(state) => Some(state.radius),
            _ => None,
        }
    }

    /// Decide which agents to add for this tick's collisions.
    ///
    /// `roster_len` is the roster size before anything from this tick is
    /// appended. The radius of the capped variant only grows when an agent is
    /// actually spawned; a tick suppressed by the cap leaves it unchanged.
    pub fn spawn(
        &mut self,
        collisions: &[CollisionGroup],
        roster_len: usize,
        rng: &mut ChaCha8Rng,
    ) -> Vec<Agent> {
        match self {
            SpawnPolicy::PerCollision { extent } => collisions
                .iter()
                .map(|group| {
                    let agent = random_agent(*extent, rng);
                    trace!(
                        collision_x = group.position.x,
                        collision_y = group.position.y,
                        collision_size = group.size(),
                        spawn_x = agent.position.x,
                        spawn_y = agent.position.y,
                        "Spawned agent for collision"
                    );
                    agent
                })
                .collect(),

            SpawnPolicy::CappedSingle(state) => {
                let Some(first) = collisions.first() else {
                    return Vec::new();
                };

                if state.at_capacity(roster_len) {
                    trace!(
                        roster_len,
                        max_agents = state.max_agents,
                        "Spawn suppressed: roster at capacity"
                    );
                    return Vec::new();
                }

                let agent = random_agent(state.radius, rng);
                state.radius = state.radius.saturating_add(state.radius_growth);
                trace!(
                    collision_x = first.position.x,
                    collision_y = first.position.y,
                    ignored_groups = collisions.len() - 1,
                    spawn_x = agent.position.x,
                    spawn_y = agent.position.y,
                    next_radius = state.radius,
                    "Spawned agent for first collision"
                );
                vec![agent]
            }

            SpawnPolicy::Disabled => Vec::new(),
        }
    }
}

fn random_agent(extent: i64, rng: &mut ChaCha8Rng) -> Agent {
    let x = rng.gen_range(-extent..=extent);
    let y = rng.gen_range(-extent..=extent);
    Agent::new(Position::new(x, y), Heading::random(rng))
}
