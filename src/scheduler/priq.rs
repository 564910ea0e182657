use super::{PriorityOrder, QueueOrder};
use crate::core::{Process, Ticks};

/// Ready-queue ordering: most urgent priority first, then the process that
/// was dispatched least recently. Processes that never ran come before any
/// that did.
#[derive(Debug, Clone, Copy)]
pub struct ByPriority {
    direction: PriorityOrder,
}

impl ByPriority {
    pub fn new(direction: PriorityOrder) -> Self {
        Self { direction }
    }
}

impl QueueOrder for ByPriority {
    // Widened so that negating i64::MIN cannot overflow
    type Key = (i128, Option<Ticks>);

    fn key(&self, proc: &Process) -> Self::Key {
        let priority = i128::from(proc.priority);
        let urgency = match self.direction {
            PriorityOrder::HigherFirst => -priority,
            PriorityOrder::LowerFirst => priority,
        };
        (urgency, proc.time_last_run)
    }
}
