//! Headless runner: drives the simulation at a 60 Hz frame cadence.

mod cli;
mod metrics;
mod telemetry;

use ant_core::{RunConfig, RunId, REFERENCE_FRAME_RATE};
use ant_world::{batch_size, SharedSimulation, Simulation};
use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use tokio::signal;
use tokio::sync::watch;
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.resolve()?;

    telemetry::init_telemetry(config.otel_endpoint.as_deref(), config.json_logs)?;

    let run_id = RunId::new();
    info!(
        run_id = %run_id,
        seed = config.simulation.seed,
        steps_per_second = config.steps_per_second,
        ticks_per_frame = batch_size(config.steps_per_second),
        strategy = ?config.simulation.reset.strategy,
        spawn_variant = ?config.simulation.reset.spawn_variant,
        "Starting ant-runner"
    );

    let sim = Simulation::new(config.simulation.clone())?;
    let placement = sim.last_placement();
    if placement.is_complete() {
        info!(placed = placement.placed, "Initial roster placed");
    } else {
        warn!(
            requested = placement.requested,
            placed = placement.placed,
            "Initial roster is short of the requested count"
        );
    }

    let shared = SharedSimulation::new(sim);
    let (stop_tx, stop_rx) = watch::channel(false);
    let observer = tokio::spawn(observe(shared.clone(), stop_rx));

    let started = Instant::now();
    let frames = drive(shared.clone(), &config, run_id).await;
    let _ = stop_tx.send(true);

    // Give the observer a moment to finish its last read
    let timeout = tokio::time::sleep(Duration::from_secs(5));
    tokio::pin!(timeout);
    tokio::select! {
        result = observer => {
            if let Err(e) = result {
                warn!("Observer task failed: {}", e);
            }
        }
        _ = &mut timeout => {
            warn!("Observer shutdown timeout reached");
        }
    }

    let stats = shared.stats();
    metrics::emit_run_summary(run_id, &stats, frames, started.elapsed());

    if args.print_snapshot {
        println!("{}", serde_json::to_string_pretty(&shared.snapshot())?);
    }

    telemetry::shutdown_telemetry();

    Ok(())
}

/// Run frames until `max_frames` is reached or a shutdown signal arrives.
/// Returns the number of frames completed.
async fn drive(shared: SharedSimulation, config: &RunConfig, run_id: RunId) -> u64 {
    let frame_period = Duration::from_secs_f64(1.0 / REFERENCE_FRAME_RATE as f64);
    let mut cadence = interval(frame_period);
    cadence.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let log_every = config.log_interval_ticks;
    let mut next_log = log_every;
    let mut frame = 0u64;

    loop {
        if config.max_frames.is_some_and(|max| frame >= max) {
            return frame;
        }

        tokio::select! {
            _ = &mut shutdown => return frame,
            _ = next_frame(&mut cadence, config.unpaced) => {}
        }

        let report = shared.run_frame(config.steps_per_second);
        frame += 1;

        if report.spawned > 0 {
            debug!(frame, spawned = report.spawned, "Frame spawned agents");
        }

        let tick = shared.read(|sim| sim.tick_count());
        if tick >= next_log {
            metrics::emit_population_metrics(run_id, &shared.stats());
            next_log = (tick / log_every + 1) * log_every;
        }
    }
}

async fn next_frame(cadence: &mut Interval, unpaced: bool) {
    if unpaced {
        tokio::task::yield_now().await;
    } else {
        cadence.tick().await;
    }
}

/// Renderer stand-in: samples whole-tick snapshots once a second.
async fn observe(shared: SharedSimulation, mut stop: watch::Receiver<bool>) {
    let mut every_second = interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = every_second.tick() => {
                let snapshot = shared.snapshot();
                let black = snapshot.cells.iter().filter(|c| c.value == 1).count();
                debug!(
                    tick = snapshot.tick,
                    agents = snapshot.agents.len(),
                    visited_cells = snapshot.cells.len(),
                    black_cells = black,
                    "Observed snapshot"
                );
            }
            _ = stop.changed() => break,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
