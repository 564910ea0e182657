//! Queue orderings.
//!
//! Each of the scheduler's queues is a [`ProcQueue`](crate::core::ProcQueue)
//! parameterized by one of these orderings. An ordering maps a process to a
//! sort key; smaller keys leave the queue first.

pub mod fifo;
pub mod priq;

use std::fmt;

use crate::core::Process;
pub use fifo::{ByArrival, ByUnblock};
pub use priq::ByPriority;

pub trait QueueOrder: fmt::Debug {
    type Key: Ord + Copy + fmt::Debug;

    fn key(&self, proc: &Process) -> Self::Key;
}

/// Which end of the priority range is dispatched first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityOrder {
    /// Numerically larger priorities are more urgent.
    #[default]
    HigherFirst,
    /// Numerically smaller priorities are more urgent.
    LowerFirst,
}
