pub mod driver;
pub mod event;
pub mod observer;
pub mod queue;
pub mod state;

pub use driver::SchedCore;
pub use event::{Outcome, SchedEvent};
pub use queue::{ProcQueue, Rank};
pub use state::{KernelCtx, Priority, ProcId, ProcState, Process, QueueKind, Ticks};
