use log::info;
use slotmap::SecondaryMap;

use super::{
    job::{Job, JobInstance},
    report::SimReport,
};
use crate::{
    core::{SchedCore, SchedEvent, TaskId, Ticks},
    scheduler::Scheduler,
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    pub jobs: Vec<JobInstance>,
    job_cursor: usize,
    // TaskId --> job[index] map; used to propagate task completion to Job object
    tasks_to_jobs: SecondaryMap<TaskId, usize>,
    idle_ticks: Ticks,
    idle_streak: Ticks,
    longest_idle_streak: Ticks,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(mut jobs: Vec<Job>, scheduler: S) -> Self {
        jobs.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        let jobs = jobs
            .into_iter()
            .map(|job| JobInstance {
                job,
                start_time: None,
                completion_time: None,
            })
            .collect();

        Self {
            core: SchedCore::new(scheduler),
            jobs,
            job_cursor: 0,
            tasks_to_jobs: SecondaryMap::new(),
            idle_ticks: 0,
            idle_streak: 0,
            longest_idle_streak: 0,
        }
    }

    /// Admits this tick's arrivals, advances the scheduler once, and returns
    /// the tick's events.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        self.handle_arrivals();
        let now = self.core.now();
        let events = self.core.tick();

        let mut idle = false;
        for event in &events {
            match *event {
                SchedEvent::Dispatched { task } => {
                    let job = &mut self.jobs[self.tasks_to_jobs[task]];
                    job.start_time.get_or_insert(now);
                }
                SchedEvent::Completed { task, .. } => {
                    let job_index = *self
                        .tasks_to_jobs
                        .get(task)
                        .expect("Completed task missing associated job");
                    self.jobs[job_index].completion_time = self.core.ctx.task(task).completion;
                }
                SchedEvent::Idle => idle = true,
                SchedEvent::Admitted { .. } | SchedEvent::Preempted { .. } => {}
            }
        }

        if idle {
            self.idle_ticks += 1;
            self.idle_streak += 1;
            self.longest_idle_streak = self.longest_idle_streak.max(self.idle_streak);
        } else {
            self.idle_streak = 0;
        }

        events
    }

    fn handle_arrivals(&mut self) {
        let now = self.core.now();
        while let Some(instance) = self.jobs.get(self.job_cursor) {
            // Contiguous, since jobs are sorted by arrival
            if instance.job.arrival_time != now {
                debug_assert!(instance.job.arrival_time > now, "Job arrival in the past");
                break;
            }

            let task_id = self
                .core
                .create_task(instance.job.work, instance.job.arrival_time);
            self.tasks_to_jobs.insert(task_id, self.job_cursor);
            self.core.admit(task_id);

            self.job_cursor += 1;
        }
    }

    pub fn job_for_task(&self, task: TaskId) -> Option<&JobInstance> {
        self.tasks_to_jobs.get(task).map(|&index| &self.jobs[index])
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.jobs.iter().all(|job| job.completion_time.is_some())
    }

    /// Steps until every job has completed.
    pub fn run(&mut self) -> SimReport {
        while !self.all_jobs_completed() {
            self.step();
        }

        let report = self.report();
        info!(
            "{}: {} jobs done at t={}",
            report.policy, report.total_admitted, report.ticks
        );
        report
    }

    pub fn report(&self) -> SimReport {
        SimReport::new(
            self.core.scheduler.name(),
            self.core.now(),
            &self.core.ctx,
            &self.jobs,
            self.idle_ticks,
            self.longest_idle_streak,
        )
    }
}
