use serde::{Deserialize, Serialize};

use crate::core::Ticks;

pub type JobId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub work: u64,
}

#[derive(Debug, Clone)]
pub struct JobInstance {
    pub job: Job,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl JobInstance {
    pub fn waiting_time(&self) -> Option<Ticks> {
        self.completion_time.map(|t| t - self.job.arrival_time)
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.start_time.map(|t| t - self.job.arrival_time)
    }
}
