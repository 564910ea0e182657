use crate::core::{ProcId, Ticks};

/// How a dispatch interval ended, or that the CPU sat idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Terminate,
    Block,
    Preempt,
    Idle,
}

impl Outcome {
    pub fn tag(self) -> char {
        match self {
            Outcome::Terminate => 'T',
            Outcome::Block => 'B',
            Outcome::Preempt => 'P',
            Outcome::Idle => 'I',
        }
    }
}

/// One interval of simulated time. `proc` is `None` for idle intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedEvent {
    pub start: Ticks,
    pub proc: Option<ProcId>,
    pub duration: Ticks,
    pub outcome: Outcome,
}

impl SchedEvent {
    pub fn end(&self) -> Ticks {
        self.start + self.duration
    }
}
