use log::{info, warn};
use slotmap::SlotMap;

use super::{
    ProcessDescriptor,
    stats::{Aggregator, ProcessStats},
};
use crate::{
    config::SimConfig,
    core::{Outcome, ProcId, Process, SchedCore, SchedEvent, Ticks},
    error::Result,
};

pub struct Sim {
    pub core: SchedCore,
    aggregator: Aggregator,
    events: Vec<SchedEvent>,
}

impl Sim {
    pub fn new(descriptors: &[ProcessDescriptor], config: &SimConfig) -> Self {
        let mut core = SchedCore::new(config);
        for desc in descriptors {
            core.spawn(desc);
        }

        if descriptors.is_empty() {
            warn!("No processes to schedule");
        }

        Self {
            core,
            aggregator: Aggregator::new(descriptors.len(), config.block_duration),
            events: Vec::new(),
        }
    }

    pub fn step(&mut self) -> Result<Option<&SchedEvent>> {
        let Some(event) = self.core.step()? else {
            return Ok(None);
        };

        if event.outcome == Outcome::Terminate {
            let id = event
                .proc
                .expect("Terminate event must name a process");
            self.aggregator.record(self.core.ctx.proc(id));
        }

        self.events.push(event);
        Ok(self.events.last())
    }

    pub fn all_processes_terminated(&self) -> bool {
        self.core.is_finished()
    }

    pub fn run(mut self) -> Result<Report> {
        while self.step()?.is_some() {}

        let Sim {
            core,
            aggregator,
            events,
        } = self;
        let end_time = core.now();
        info!(
            "Simulation finished at t={end_time} after {} steps",
            core.observer().steps()
        );

        Ok(Report {
            procs: core.ctx.procs,
            events,
            aggregator,
            end_time,
        })
    }
}

/// Runs `descriptors` to completion under `config`.
///
/// Fails with `Error::TimeOverflow` if the schedule runs past the end of the
/// simulated clock.
pub fn simulate(descriptors: &[ProcessDescriptor], config: &SimConfig) -> Result<Report> {
    Sim::new(descriptors, config).run()
}

/// The outcome of a finished simulation.
#[derive(Debug)]
pub struct Report {
    procs: SlotMap<ProcId, Process>,
    events: Vec<SchedEvent>,
    aggregator: Aggregator,
    end_time: Ticks,
}

impl Report {
    /// Events in the order they happened.
    pub fn events(&self) -> &[SchedEvent] {
        &self.events
    }

    pub fn name(&self, id: ProcId) -> Option<&str> {
        self.procs.get(id).map(|p| p.name.as_str())
    }

    /// Final processes, in input order.
    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        let mut procs: Vec<_> = self.procs.values().collect();
        procs.sort_by_key(|p| p.input_index);
        procs.into_iter()
    }

    pub fn end_time(&self) -> Ticks {
        self.end_time
    }

    pub fn process_count(&self) -> usize {
        self.aggregator.process_count()
    }

    pub fn average_turnaround(&self) -> Option<f64> {
        self.aggregator.average_turnaround()
    }

    /// Stats in termination order.
    pub fn process_stats(&self) -> &[ProcessStats] {
        self.aggregator.completed()
    }

    pub fn mean_waiting_time(&self) -> Option<f64> {
        self.aggregator.mean_waiting_time()
    }

    pub fn mean_response_time(&self) -> Option<f64> {
        self.aggregator.mean_response_time()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.events.iter().filter(|e| e.outcome == outcome).count()
    }

    pub fn busy_time(&self) -> Ticks {
        self.events
            .iter()
            .filter(|e| e.outcome != Outcome::Idle)
            .map(|e| e.duration)
            .sum()
    }

    /// Fraction of simulated time the CPU was running a process.
    pub fn cpu_utilization(&self) -> Option<f64> {
        (self.end_time > 0).then(|| self.busy_time() as f64 / self.end_time as f64)
    }
}
