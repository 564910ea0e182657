use std::num::NonZeroU64;

use crate::{
    core::Ticks,
    error::{Error, Result},
    scheduler::PriorityOrder,
};

/// Scheduler parameters shared by every process in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Maximum CPU time granted per dispatch.
    pub time_slice: NonZeroU64,
    /// Time a process stays blocked after an I/O event.
    pub block_duration: Ticks,
    pub priority_order: PriorityOrder,
}

impl SimConfig {
    pub fn new(time_slice: Ticks, block_duration: Ticks) -> Result<Self> {
        let time_slice = NonZeroU64::new(time_slice).ok_or(Error::ZeroTimeSlice)?;
        Ok(Self {
            time_slice,
            block_duration,
            priority_order: PriorityOrder::default(),
        })
    }

    pub fn with_priority_order(mut self, priority_order: PriorityOrder) -> Self {
        self.priority_order = priority_order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_time_slice() {
        assert!(matches!(SimConfig::new(0, 3), Err(Error::ZeroTimeSlice)));
    }

    #[test]
    fn defaults_to_higher_first() {
        let config = SimConfig::new(2, 0).unwrap();
        assert_eq!(config.time_slice.get(), 2);
        assert_eq!(config.block_duration, 0);
        assert_eq!(config.priority_order, PriorityOrder::HigherFirst);

        let config = config.with_priority_order(PriorityOrder::LowerFirst);
        assert_eq!(config.priority_order, PriorityOrder::LowerFirst);
    }
}
