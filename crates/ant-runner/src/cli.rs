//! Command-line arguments and their merge into the run configuration.

use ant_core::{parse_agent_count, parse_max_agents, PlacementStrategy, RunConfig, SpawnVariant};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Clustered,
    Scattered,
    Classic,
}

impl From<StrategyArg> for PlacementStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Clustered => PlacementStrategy::Clustered,
            StrategyArg::Scattered => PlacementStrategy::Scattered,
            StrategyArg::Classic => PlacementStrategy::Classic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SpawnArg {
    PerCollision,
    CappedSingle,
    Disabled,
}

impl From<SpawnArg> for SpawnVariant {
    fn from(arg: SpawnArg) -> Self {
        match arg {
            SpawnArg::PerCollision => SpawnVariant::PerCollision,
            SpawnArg::CappedSingle => SpawnVariant::CappedSingle,
            SpawnArg::Disabled => SpawnVariant::Disabled,
        }
    }
}

/// Headless Langton's-ant swarm runner
#[derive(Debug, Parser)]
#[command(name = "ant-runner", version, about)]
pub struct Args {
    /// JSON run configuration; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of agents to place (clamped to 1..=100)
    #[arg(long, allow_hyphen_values = true)]
    pub agents: Option<String>,

    /// Initial placement strategy
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Roster cap for the capped spawn variant (0 = unlimited)
    #[arg(long, allow_hyphen_values = true)]
    pub max_agents: Option<String>,

    /// Spawn rule applied to collisions
    #[arg(long, value_enum)]
    pub spawn: Option<SpawnArg>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Steps per second
    #[arg(long)]
    pub rate: Option<u32>,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Run frames back to back instead of at 60 Hz
    #[arg(long)]
    pub unpaced: bool,

    /// Emit population metrics every N ticks
    #[arg(long)]
    pub log_interval: Option<u64>,

    /// JSON log output
    #[arg(long)]
    pub json_logs: bool,

    /// OTLP endpoint for trace export
    #[arg(long)]
    pub otel_endpoint: Option<String>,

    /// Print the final world snapshot as JSON on stdout
    #[arg(long)]
    pub print_snapshot: bool,
}

impl Args {
    /// Resolve the effective configuration: file (or defaults), then flags.
    pub fn resolve(&self) -> ant_core::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        let reset = &mut config.simulation.reset;
        if let Some(agents) = &self.agents {
            reset.agent_count = parse_agent_count(agents) as i64;
        }
        if let Some(strategy) = self.strategy {
            reset.strategy = strategy.into();
        }
        if let Some(max_agents) = &self.max_agents {
            reset.max_agents = parse_max_agents(max_agents)?;
        }
        if let Some(spawn) = self.spawn {
            reset.spawn_variant = spawn.into();
        }

        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(rate) = self.rate {
            config.steps_per_second = rate;
        }
        if let Some(frames) = self.frames {
            config.max_frames = Some(frames);
        }
        if let Some(interval) = self.log_interval {
            config.log_interval_ticks = interval;
        }
        if self.otel_endpoint.is_some() {
            config.otel_endpoint = self.otel_endpoint.clone();
        }
        config.unpaced |= self.unpaced;
        config.json_logs |= self.json_logs;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ant_core::Error;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("ant-runner").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).resolve().unwrap();
        assert_eq!(config.steps_per_second, 60);
        assert_eq!(config.simulation.reset.agent_count, 1);
        assert!(!config.unpaced);
    }

    #[test]
    fn test_flags_override() {
        let config = parse(&[
            "--agents", "250",
            "--strategy", "scattered",
            "--spawn", "capped-single",
            "--max-agents", "40",
            "--seed", "3",
            "--rate", "600",
            "--frames", "10",
            "--unpaced",
        ])
        .resolve()
        .unwrap();

        let reset = &config.simulation.reset;
        assert_eq!(reset.agent_count, 100);
        assert_eq!(reset.strategy, PlacementStrategy::Scattered);
        assert_eq!(reset.spawn_variant, SpawnVariant::CappedSingle);
        assert_eq!(reset.max_agents, 40);
        assert_eq!(config.simulation.seed, 3);
        assert_eq!(config.steps_per_second, 600);
        assert_eq!(config.max_frames, Some(10));
        assert!(config.unpaced);
    }

    #[test]
    fn test_lenient_agent_count() {
        let config = parse(&["--agents", "lots"]).resolve().unwrap();
        assert_eq!(config.simulation.reset.agent_count, 1);

        let config = parse(&["--agents", "-5"]).resolve().unwrap();
        assert_eq!(config.simulation.reset.agent_count, 1);
    }

    #[test]
    fn test_bad_cap_fails_fast() {
        let result = parse(&["--max-agents", "-3"]).resolve();
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_zero_log_interval_rejected() {
        let result = parse(&["--log-interval", "0"]).resolve();
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
