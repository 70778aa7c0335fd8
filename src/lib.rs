pub mod core;
pub mod logger;
pub mod scheduler;
pub mod sim;

pub use crate::core::SchedEvent;
pub use scheduler::{Policy, Scheduler};
pub use sim::{Job, Sim, SimConfig, SimReport};
