use crate::core::{Priority, Ticks};

/// A process as described by one line of the workload file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessDescriptor {
    pub name: String,
    pub priority: Priority,
    pub arrival_time: Ticks,
    pub total_time: Ticks,
    pub block_interval: Ticks,
}
