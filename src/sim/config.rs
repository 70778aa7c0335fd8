use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    job::{Job, JobId},
    workload::BernoulliWorkload,
};
use crate::{
    core::Ticks,
    scheduler::{Policy, RoundRobin, ShortestJobFirst, ShortestRemainingTimeFirst},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Round Robin quantum must be positive")]
    ZeroQuantum,

    #[error("Job {job} requires no work")]
    ZeroWork { job: JobId },

    #[error("Generated job sizes must be positive")]
    ZeroJobSize,

    #[error("Probability '{name}' = {value} is outside [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("No scheduling policies configured")]
    NoPolicies,

    #[error("Explicit workload contains no jobs")]
    EmptyWorkload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    RoundRobin { quantum: Ticks },
    ShortestJobFirst,
    ShortestRemainingTimeFirst,
}

impl PolicyConfig {
    /// Panics on a zero quantum; run [`SimConfig::validate`] first.
    pub fn build(&self) -> Policy {
        match *self {
            Self::RoundRobin { quantum } => RoundRobin::new(quantum).into(),
            Self::ShortestJobFirst => ShortestJobFirst::new().into(),
            Self::ShortestRemainingTimeFirst => ShortestRemainingTimeFirst::new().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkloadConfig {
    Bernoulli(BernoulliWorkload),
    Explicit { jobs: Vec<Job> },
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self::Bernoulli(BernoulliWorkload::default())
    }
}

impl WorkloadConfig {
    pub fn jobs(&self) -> Vec<Job> {
        match self {
            Self::Bernoulli(workload) => workload.generate(),
            Self::Explicit { jobs } => jobs.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub policies: Vec<PolicyConfig>,
    pub workload: WorkloadConfig,
    pub json_output: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            policies: vec![
                PolicyConfig::RoundRobin { quantum: 3 },
                PolicyConfig::ShortestJobFirst,
                PolicyConfig::ShortestRemainingTimeFirst,
            ],
            workload: WorkloadConfig::default(),
            json_output: false,
        }
    }
}

impl SimConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policies.is_empty() {
            return Err(ConfigError::NoPolicies);
        }
        if self
            .policies
            .iter()
            .any(|p| matches!(p, PolicyConfig::RoundRobin { quantum: 0 }))
        {
            return Err(ConfigError::ZeroQuantum);
        }

        match &self.workload {
            WorkloadConfig::Bernoulli(w) => {
                for (name, value) in [("p_arrival", w.p_arrival), ("p_short", w.p_short)] {
                    if !(0.0..=1.0).contains(&value) {
                        return Err(ConfigError::InvalidProbability { name, value });
                    }
                }
                if w.short_work == 0 || w.long_work == 0 {
                    return Err(ConfigError::ZeroJobSize);
                }
            }
            WorkloadConfig::Explicit { jobs } => {
                if jobs.is_empty() {
                    return Err(ConfigError::EmptyWorkload);
                }
                if let Some(job) = jobs.iter().find(|j| j.work == 0) {
                    return Err(ConfigError::ZeroWork { job: job.id });
                }
            }
        }

        Ok(())
    }
}
