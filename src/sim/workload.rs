use rand::prelude::*;

use super::ProcessDescriptor;
use crate::core::{Priority, Ticks};

/// Shape of a randomly generated workload.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadShape {
    /// Arrivals are drawn for every tick in `0..ticks`.
    pub ticks: Ticks,
    /// Probability that a process arrives on a given tick.
    pub p_arrival: f64,
    /// Probability that an arriving process is short.
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
    /// Priorities are drawn from `0..=max_priority`.
    pub max_priority: Priority,
    /// Block intervals are drawn from `1..=max_block_interval`.
    pub max_block_interval: Ticks,
}

impl Default for WorkloadShape {
    fn default() -> Self {
        Self {
            ticks: 100,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            max_priority: 3,
            max_block_interval: 8,
        }
    }
}

/// Bernoulli arrival process over `shape.ticks` ticks, reproducible from
/// `seed`.
pub fn bernoulli_workload(shape: &WorkloadShape, seed: u64) -> Vec<ProcessDescriptor> {
    assert!(shape.max_block_interval > 0, "Block intervals must be positive");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut procs = Vec::new();

    for t in 0..shape.ticks {
        if rng.random::<f64>() < shape.p_arrival {
            let total_time = if rng.random::<f64>() < shape.p_short {
                shape.short_ticks
            } else {
                shape.long_ticks
            };

            procs.push(ProcessDescriptor {
                name: format!("P{}", procs.len()),
                priority: rng.random_range(0..=shape.max_priority),
                arrival_time: t,
                total_time,
                block_interval: rng.random_range(1..=shape.max_block_interval),
            });
        }
    }

    procs
}
