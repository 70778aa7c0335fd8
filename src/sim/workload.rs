use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::job::Job;
use crate::core::Ticks;

/// Each tick a job arrives with probability `p_arrival`; an arriving job is
/// short with probability `p_short`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BernoulliWorkload {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_work: u64,
    pub long_work: u64,
    pub seed: u64,
}

impl Default for BernoulliWorkload {
    fn default() -> Self {
        Self {
            ticks: 500,
            p_arrival: 0.3,
            p_short: 0.3,
            short_work: 2,
            long_work: 6,
            seed: 0,
        }
    }
}

impl BernoulliWorkload {
    pub fn generate(&self) -> Vec<Job> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut jobs = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let work = if rng.random::<f64>() < self.p_short {
                    self.short_work
                } else {
                    self.long_work
                };

                jobs.push(Job {
                    id: jobs.len() as u64,
                    arrival_time: t,
                    work,
                });
            }
        }

        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_jobs() {
        let workload = BernoulliWorkload::default();
        assert_eq!(workload.generate(), workload.generate());
    }

    #[test]
    fn jobs_use_configured_sizes() {
        let workload = BernoulliWorkload {
            ticks: 200,
            p_arrival: 0.5,
            ..Default::default()
        };
        let jobs = workload.generate();

        assert!(!jobs.is_empty());
        assert!(jobs.iter().all(|j| j.work == 2 || j.work == 6));
        assert!(jobs.windows(2).all(|w| w[0].arrival_time < w[1].arrival_time));
    }

    #[test]
    fn zero_arrival_probability_yields_nothing() {
        let workload = BernoulliWorkload {
            p_arrival: 0.0,
            ..Default::default()
        };
        assert!(workload.generate().is_empty());
    }
}
