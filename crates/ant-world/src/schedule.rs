//! Frame pacing: how many ticks each display frame runs.

use crate::simulation::Simulation;
use ant_core::REFERENCE_FRAME_RATE;
use serde::{Deserialize, Serialize};

/// Ticks to run per frame for a configured step rate.
///
/// The rate is quantized against the 60 Hz reference cadence and never drops
/// below one tick per frame.
pub fn batch_size(steps_per_second: u32) -> u32 {
    (steps_per_second / REFERENCE_FRAME_RATE).max(1)
}

/// What one frame did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    pub ticks: u32,
    pub spawned: usize,
}

/// Run one frame's batch of ticks to completion
pub fn run_frame(sim: &mut Simulation, steps_per_second: u32) -> FrameReport {
    run_batch(steps_per_second, || sim.tick().len())
}

/// Call `tick` once per tick in the frame's batch; it returns the agents spawned
pub(crate) fn run_batch(steps_per_second: u32, mut tick: impl FnMut() -> usize) -> FrameReport {
    let ticks = batch_size(steps_per_second);
    let spawned = (0..ticks).map(|_| tick()).sum();
    FrameReport { ticks, spawned }
}
