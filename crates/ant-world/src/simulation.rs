//! Simulation engine: owns the grid, the roster and the spawn policy.

use crate::agent::Agent;
use crate::collision::detect_collisions;
use crate::grid::Grid;
use crate::placement::{place_agents, PlacementOutcome};
use crate::snapshot::{AgentRecord, CellRecord, SimulationStats, WorldSnapshot};
use crate::spawn::SpawnPolicy;
use ant_core::{Cell, Position, ResetConfig, Result, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, trace, warn};

pub struct Simulation {
    grid: Grid,
    agents: Vec<Agent>,
    spawn_policy: SpawnPolicy,
    config: SimulationConfig,
    rng: ChaCha8Rng,
    tick: u64,
    total_spawned: u64,
    total_collisions: u64,
    last_placement: PlacementOutcome,
}

impl Simulation {
    /// Build a simulation and perform the initial reset from `config.reset`
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let spawn_policy = SpawnPolicy::from_config(
            config.reset.spawn_variant,
            &config.spawn,
            config.reset.max_agents,
        );
        let reset = config.reset.clone();

        let mut sim = Self {
            grid: Grid::new(),
            agents: Vec::new(),
            spawn_policy,
            config,
            rng,
            tick: 0,
            total_spawned: 0,
            total_collisions: 0,
            last_placement: PlacementOutcome {
                requested: 0,
                placed: 0,
                retries_used: 0,
            },
        };
        sim.reset(reset);

        Ok(sim)
    }

    /// Build a simulation around an explicit roster on an empty grid.
    ///
    /// The spawn policy still comes from `config.reset`; placement is skipped.
    pub fn with_roster(config: SimulationConfig, agents: Vec<Agent>) -> Result<Self> {
        let mut sim = Self::new(config)?;
        sim.grid.clear();
        sim.last_placement = PlacementOutcome {
            requested: agents.len(),
            placed: agents.len(),
            retries_used: 0,
        };
        sim.agents = agents;
        Ok(sim)
    }

    /// Clear the grid, rebuild the roster and reinitialize the spawn policy.
    ///
    /// A scattered placement that runs out of retries still completes; the
    /// shortfall is visible in the returned outcome.
    #[instrument(skip(self, reset), fields(agent_count = reset.agent_count, strategy = ?reset.strategy))]
    pub fn reset(&mut self, reset: ResetConfig) -> PlacementOutcome {
        self.grid.clear();
        self.spawn_policy =
            SpawnPolicy::from_config(reset.spawn_variant, &self.config.spawn, reset.max_agents);

        let (agents, outcome) = place_agents(&reset, &self.config.placement, &mut self.rng);
        self.agents = agents;
        self.tick = 0;
        self.total_spawned = 0;
        self.total_collisions = 0;
        self.last_placement = outcome;
        self.config.reset = reset;

        if outcome.is_complete() {
            debug!(
                placed = outcome.placed,
                retries_used = outcome.retries_used,
                "Simulation reset"
            );
        } else {
            warn!(
                requested = outcome.requested,
                placed = outcome.placed,
                retries_used = outcome.retries_used,
                "Placement retry budget exhausted; roster is short"
            );
        }

        outcome
    }

    /// Execute one tick and return the agents spawned by it.
    ///
    /// Agents move in roster order against the shared grid, so a later agent
    /// sees flips made earlier in the same tick. Spawned agents are appended
    /// after collision detection and first move on the next tick.
    pub fn tick(&mut self) -> Vec<Agent> {
        let roster_len = self.agents.len();

        for agent in self.agents.iter_mut() {
            agent.step(&mut self.grid);
        }

        let collisions = detect_collisions(&self.agents);
        let spawned = self
            .spawn_policy
            .spawn(&collisions, roster_len, &mut self.rng);

        if !collisions.is_empty() {
            trace!(
                tick = self.tick,
                collisions = collisions.len(),
                spawned = spawned.len(),
                population = roster_len + spawned.len(),
                "Collisions resolved"
            );
        }

        self.total_collisions += collisions.len() as u64;
        self.total_spawned += spawned.len() as u64;
        self.agents.extend_from_slice(&spawned);
        self.tick += 1;

        spawned
    }

    /// Run `count` ticks back to back and return how many agents were spawned
    pub fn run_ticks(&mut self, count: u64) -> usize {
        (0..count).map(|_| self.tick().len()).sum()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Visited cells; see [`Grid::iter`]
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.grid.iter()
    }

    /// Ticks since the last reset
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn spawn_policy(&self) -> &SpawnPolicy {
        &self.spawn_policy
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn last_placement(&self) -> PlacementOutcome {
        self.last_placement
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            tick: self.tick,
            population: self.agents.len(),
            visited_cells: self.grid.visited_count(),
            black_cells: self.grid.black_count(),
            total_spawned: self.total_spawned,
            total_collisions: self.total_collisions,
            spawn_radius: self.spawn_policy.radius(),
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let mut cells: Vec<(Position, Cell)> = self.grid.iter().collect();
        cells.sort_by_key(|(pos, _)| *pos);

        WorldSnapshot {
            tick: self.tick,
            cells: cells.into_iter().map(CellRecord::from).collect(),
            agents: self.agents.iter().map(AgentRecord::from).collect(),
        }
    }
}
