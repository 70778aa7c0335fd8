pub mod config;
pub mod driver;
pub mod job;
pub mod report;
pub mod workload;

pub use config::{ConfigError, PolicyConfig, SimConfig, WorkloadConfig};
pub use driver::Sim;
pub use job::{Job, JobId, JobInstance};
pub use report::SimReport;
pub use workload::BernoulliWorkload;
