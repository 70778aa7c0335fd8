use std::fmt;

use average::{Estimate, Mean};
use serde::Serialize;

use super::job::JobInstance;
use crate::core::{SimCtx, Ticks};

/// End-of-run statistics for one policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub policy: &'static str,
    pub ticks: Ticks,
    pub total_admitted: u64,
    pub cumulative_waiting_time: Ticks,
    pub average_waiting_time: f64,
    pub average_response_time: f64,
    pub idle_ticks: Ticks,
    pub longest_idle_streak: Ticks,
}

impl SimReport {
    pub fn new(
        policy: &'static str,
        ticks: Ticks,
        ctx: &SimCtx,
        jobs: &[JobInstance],
        idle_ticks: Ticks,
        longest_idle_streak: Ticks,
    ) -> Self {
        let waiting = jobs.iter().filter_map(|j| j.waiting_time()).map(|t| t as f64);
        let response = jobs.iter().filter_map(|j| j.response_time()).map(|t| t as f64);

        Self {
            policy,
            ticks,
            total_admitted: ctx.total_admitted,
            cumulative_waiting_time: ctx.cumulative_waiting_time,
            average_waiting_time: avg(waiting),
            average_response_time: avg(response),
            idle_ticks,
            longest_idle_streak,
        }
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.policy)?;
        writeln!(f, "Ticks elapsed: {}", self.ticks)?;
        writeln!(f, "Tasks admitted: {}", self.total_admitted)?;
        writeln!(f, "Total waiting time: {} ticks", self.cumulative_waiting_time)?;
        writeln!(f, "Average waiting time: {:.2} ticks", self.average_waiting_time)?;
        // Time to first run
        writeln!(f, "Average response time: {:.2} ticks", self.average_response_time)?;
        write!(
            f,
            "Idle ticks: {} (longest streak {})",
            self.idle_ticks, self.longest_idle_streak
        )
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Job;

    fn done(arrival_time: Ticks, start: Ticks, completion: Ticks) -> JobInstance {
        JobInstance {
            job: Job {
                id: 0,
                arrival_time,
                work: 1,
            },
            start_time: Some(start),
            completion_time: Some(completion),
        }
    }

    #[test]
    fn averages_over_completed_jobs() {
        let jobs = [done(0, 0, 4), done(2, 4, 8)];
        let report = SimReport::new("test", 9, &SimCtx::new(), &jobs, 1, 1);

        assert_eq!(report.average_waiting_time, 5.0);
        assert_eq!(report.average_response_time, 1.0);
    }

    #[test]
    fn display_names_the_policy() {
        let report = SimReport::new("round_robin", 0, &SimCtx::new(), &[], 0, 0);
        assert!(report.to_string().starts_with("== round_robin =="));
    }
}
