//! Structured metric events emitted while a run progresses.

use ant_core::RunId;
use ant_world::SimulationStats;
use std::time::Duration;
use tracing::{event, info, Level};

/// Emit a population snapshot plus gauge events
pub fn emit_population_metrics(run_id: RunId, stats: &SimulationStats) {
    info!(
        event = "population_metrics",
        run_id = %run_id,
        tick = stats.tick,
        population = stats.population,
        visited_cells = stats.visited_cells,
        black_cells = stats.black_cells,
        total_spawned = stats.total_spawned,
        total_collisions = stats.total_collisions,
        spawn_radius = ?stats.spawn_radius,
        "Population metrics snapshot"
    );

    event!(
        Level::INFO,
        gauge_name = "population_total",
        gauge_value = stats.population,
        tick = stats.tick,
        "Population gauge"
    );

    event!(
        Level::INFO,
        gauge_name = "black_cells",
        gauge_value = stats.black_cells,
        tick = stats.tick,
        "Black cell gauge"
    );
}

/// Emit the end-of-run summary
pub fn emit_run_summary(run_id: RunId, stats: &SimulationStats, frames: u64, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    let ticks_per_second = if secs > 0.0 {
        stats.tick as f64 / secs
    } else {
        0.0
    };

    info!(
        event = "run_summary",
        run_id = %run_id,
        frames = frames,
        total_ticks = stats.tick,
        final_population = stats.population,
        visited_cells = stats.visited_cells,
        black_cells = stats.black_cells,
        total_spawned = stats.total_spawned,
        total_collisions = stats.total_collisions,
        spawn_radius = ?stats.spawn_radius,
        elapsed_ms = elapsed.as_millis() as u64,
        ticks_per_second = format!("{:.1}", ticks_per_second),
        "Run complete"
    );

    event!(
        Level::INFO,
        gauge_name = "final_population",
        gauge_value = stats.population,
        "Final population gauge"
    );
}
