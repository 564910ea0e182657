use average::Mean;

use crate::core::{Process, Ticks};

/// Per-process figures captured when a process terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStats {
    pub name: String,
    pub arrival_time: Ticks,
    pub first_run: Ticks,
    pub completion_time: Ticks,
    pub turnaround: Ticks,
    pub cpu_time: Ticks,
    pub blocked_time: Ticks,
    pub waiting_time: Ticks,
}

impl ProcessStats {
    fn from_process(proc: &Process, block_duration: Ticks) -> Self {
        let completion_time = proc
            .completion_time
            .expect("Stats recorded for a process that has not terminated");
        let first_run = proc
            .first_run
            .expect("Terminated process must have been dispatched");
        let turnaround = completion_time - proc.arrival_time;
        let blocked_time = proc.times_blocked * block_duration;

        Self {
            name: proc.name.clone(),
            arrival_time: proc.arrival_time,
            first_run,
            completion_time,
            turnaround,
            cpu_time: proc.total_time,
            blocked_time,
            waiting_time: turnaround - proc.total_time - blocked_time,
        }
    }

    pub fn response_time(&self) -> Ticks {
        self.first_run - self.arrival_time
    }
}

/// Accumulates turnaround at each termination.
///
/// The divisor is the number of processes in the input, fixed up front.
#[derive(Debug, Clone)]
pub struct Aggregator {
    process_count: usize,
    block_duration: Ticks,
    turnaround_sum: Ticks,
    completed: Vec<ProcessStats>,
}

impl Aggregator {
    pub fn new(process_count: usize, block_duration: Ticks) -> Self {
        Self {
            process_count,
            block_duration,
            turnaround_sum: 0,
            completed: Vec::with_capacity(process_count),
        }
    }

    pub fn record(&mut self, proc: &Process) {
        let stats = ProcessStats::from_process(proc, self.block_duration);
        self.turnaround_sum += stats.turnaround;
        self.completed.push(stats);
    }

    pub fn process_count(&self) -> usize {
        self.process_count
    }

    pub fn turnaround_sum(&self) -> Ticks {
        self.turnaround_sum
    }

    /// `None` when there were no processes to average over.
    pub fn average_turnaround(&self) -> Option<f64> {
        if self.process_count == 0 {
            return None;
        }
        Some(self.turnaround_sum as f64 / self.process_count as f64)
    }

    pub fn completed(&self) -> &[ProcessStats] {
        &self.completed
    }

    pub fn mean_waiting_time(&self) -> Option<f64> {
        mean(self.completed.iter().map(|s| s.waiting_time))
    }

    pub fn mean_response_time(&self) -> Option<f64> {
        mean(self.completed.iter().map(ProcessStats::response_time))
    }
}

fn mean(values: impl Iterator<Item = Ticks>) -> Option<f64> {
    let mean: Mean = values.map(|v| v as f64).collect();
    (!mean.is_empty()).then(|| mean.mean())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::ProcState, sim::ProcessDescriptor};

    fn terminated(name: &str, arrival: Ticks, total: Ticks, first_run: Ticks, done: Ticks, blocks: u64) -> Process {
        let desc = ProcessDescriptor {
            name: name.to_owned(),
            priority: 0,
            arrival_time: arrival,
            total_time: total,
            block_interval: 1,
        };
        let mut proc = Process::from_descriptor(&desc, 0);
        proc.time_left = 0;
        proc.first_run = Some(first_run);
        proc.completion_time = Some(done);
        proc.times_blocked = blocks;
        proc.state = ProcState::Terminated;
        proc
    }

    #[test]
    fn averages_over_input_count() {
        let mut agg = Aggregator::new(2, 3);
        agg.record(&terminated("A", 0, 4, 0, 10, 1));
        agg.record(&terminated("B", 2, 3, 4, 7, 0));

        assert_eq!(agg.turnaround_sum(), 15);
        assert_eq!(agg.average_turnaround(), Some(7.5));

        let a = &agg.completed()[0];
        assert_eq!(a.blocked_time, 3);
        assert_eq!(a.waiting_time, 3);
        assert_eq!(agg.completed()[1].response_time(), 2);
        assert_eq!(agg.mean_response_time(), Some(1.0));
        assert_eq!(agg.mean_waiting_time(), Some(2.5));
    }

    #[test]
    fn empty_input_has_no_average() {
        let agg = Aggregator::new(0, 5);
        assert_eq!(agg.process_count(), 0);
        assert_eq!(agg.average_turnaround(), None);
        assert_eq!(agg.mean_waiting_time(), None);
    }
}
