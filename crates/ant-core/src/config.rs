//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest roster a reset will build
pub const MIN_AGENTS: usize = 1;
/// Largest roster a reset will build
pub const MAX_AGENTS: usize = 100;
/// Display cadence the step rate is quantized against (Hz)
pub const REFERENCE_FRAME_RATE: u32 = 60;

/// How the initial roster is laid out on reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Every agent at the origin with a random heading
    Clustered,
    /// Agents on distinct cells sampled in a disc around the origin
    Scattered,
    /// A single agent at the origin facing up
    Classic,
}

/// Which rule turns collisions into new agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnVariant {
    /// One new agent per collision group, anywhere in a fixed square
    PerCollision,
    /// At most one new agent per tick, inside a growing square, under a cap
    CappedSingle,
    /// Collisions are detected but never spawn
    Disabled,
}

/// Parameters applied on every reset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetConfig {
    /// Requested roster size, clamped into [MIN_AGENTS, MAX_AGENTS]
    pub agent_count: i64,
    /// Initial placement strategy
    pub strategy: PlacementStrategy,
    /// Roster cap for the capped spawn variant (0 = unlimited)
    pub max_agents: usize,
    /// Spawn rule used until the next reset
    pub spawn_variant: SpawnVariant,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            agent_count: 1,
            strategy: PlacementStrategy::Clustered,
            max_agents: 0,
            spawn_variant: SpawnVariant::PerCollision,
        }
    }
}

impl ResetConfig {
    /// Roster size a reset will aim for
    pub fn clamped_agent_count(&self) -> usize {
        clamp_agent_count(self.agent_count)
    }
}

/// Spawn geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Half-width of the square used by the per-collision variant
    pub per_collision_extent: i64,
    /// Starting half-width of the square used by the capped variant
    pub base_radius: i64,
    /// Radius increase after each capped-variant spawn
    pub radius_growth: i64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            per_collision_extent: 100,
            base_radius: 100,
            radius_growth: 2,
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<()> {
        if self.per_collision_extent < 0 {
            return Err(Error::Validation(format!(
                "per_collision_extent must be non-negative, got {}",
                self.per_collision_extent
            )));
        }
        if self.base_radius < 0 {
            return Err(Error::Validation(format!(
                "base_radius must be non-negative, got {}",
                self.base_radius
            )));
        }
        if self.radius_growth < 0 {
            return Err(Error::Validation(format!(
                "radius_growth must be non-negative, got {}",
                self.radius_growth
            )));
        }
        Ok(())
    }
}

/// Scattered placement parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Largest polar radius sampled (inclusive)
    pub scatter_radius: i64,
    /// Rejected samples allowed across a whole reset.
    ///
    /// Only samples that land on an occupied cell count; accepted samples are
    /// free, so a reset draws at most `agent_count + retry_budget` samples.
    pub retry_budget: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            scatter_radius: 20,
            retry_budget: 1000,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<()> {
        if self.scatter_radius < 0 {
            return Err(Error::Validation(format!(
                "scatter_radius must be non-negative, got {}",
                self.scatter_radius
            )));
        }
        Ok(())
    }
}

/// Everything the engine needs to build and reset itself
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    pub reset: ResetConfig,
    pub spawn: SpawnConfig,
    pub placement: PlacementConfig,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.spawn.validate()?;
        self.placement.validate()?;
        Ok(())
    }
}

/// Headless runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Target step rate (steps per second)
    pub steps_per_second: u32,
    /// Stop after this many frames (None = run until interrupted)
    pub max_frames: Option<u64>,
    /// Run frames back to back instead of at the reference cadence
    pub unpaced: bool,
    /// Emit population metrics every N ticks
    pub log_interval_ticks: u64,
    /// Format log output as JSON
    pub json_logs: bool,
    /// OpenTelemetry endpoint
    pub otel_endpoint: Option<String>,
    pub simulation: SimulationConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps_per_second: 60,
            max_frames: None,
            unpaced: false,
            log_interval_ticks: 1000,
            json_logs: false,
            otel_endpoint: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_interval_ticks == 0 {
            return Err(Error::Validation(
                "log_interval_ticks must be at least 1".to_string(),
            ));
        }
        self.simulation.validate()
    }
}

/// Clamp a requested roster size into [MIN_AGENTS, MAX_AGENTS].
pub fn clamp_agent_count(requested: i64) -> usize {
    requested.clamp(MIN_AGENTS as i64, MAX_AGENTS as i64) as usize
}

/// Lenient agent-count parsing for free-form UI input.
///
/// Reads the leading integer (`"12 ants"` is 12); input with no leading
/// integer counts as 1. The result is clamped like [`clamp_agent_count`].
pub fn parse_agent_count(input: &str) -> usize {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return MIN_AGENTS;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };
    clamp_agent_count(value)
}

/// Strict parsing for the roster cap. Non-numeric or negative input is
/// rejected rather than coerced; 0 means unlimited.
pub fn parse_max_agents(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| Error::Validation(format!("max agents must be an integer, got {:?}", input)))?;
    if value < 0 {
        return Err(Error::Validation(format!(
            "max agents must be non-negative, got {}",
            value
        )));
    }
    Ok(value as usize)
}
