pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod output;
pub mod scheduler;
pub mod sim;

pub use config::SimConfig;
pub use crate::core::{Outcome, SchedEvent};
pub use error::{Error, LineError, Result};
pub use scheduler::PriorityOrder;
pub use sim::{ProcessDescriptor, Report, Sim, simulate};
