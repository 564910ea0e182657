pub mod descriptor;
pub mod driver;
pub mod stats;
pub mod workload;

pub use descriptor::ProcessDescriptor;
pub use driver::{Report, Sim, simulate};
pub use stats::{Aggregator, ProcessStats};
pub use workload::{WorkloadShape, bernoulli_workload};
