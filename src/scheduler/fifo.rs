use super::QueueOrder;
use crate::core::{Process, Ticks};

/// Orders unarrived processes by arrival time, then by input position.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByArrival;

impl QueueOrder for ByArrival {
    type Key = (Ticks, usize);

    fn key(&self, proc: &Process) -> Self::Key {
        (proc.arrival_time, proc.input_index)
    }
}

/// Orders blocked processes by the time they become ready again.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByUnblock;

impl QueueOrder for ByUnblock {
    type Key = (Ticks, Option<Ticks>);

    fn key(&self, proc: &Process) -> Self::Key {
        let unblock_time = proc
            .unblock_time
            .expect("Process must have an unblock time when blocked");
        (unblock_time, proc.time_last_run)
    }
}
