use log::trace;

use super::{
    event::SchedEvent,
    observer::Observer,
    state::{SimCtx, TaskId, Ticks},
};
use crate::scheduler::Scheduler;

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            ctx: SimCtx::new(),
            scheduler,
            observer: Observer::new(),
        }
    }

    pub fn create_task(&mut self, total_work: u64, arrival: Ticks) -> TaskId {
        self.ctx.create_task(total_work, arrival)
    }

    pub fn admit(&mut self, task: TaskId) {
        self.scheduler.admit(&mut self.ctx, task);
    }

    /// Runs the current tick and moves the clock forward. Returns everything
    /// that happened since the previous tick, admissions included.
    pub fn tick(&mut self) -> Vec<SchedEvent> {
        self.scheduler.advance(&mut self.ctx);
        self.observer.observe(&self.ctx, &self.scheduler);

        let events = self.ctx.drain_events();
        for event in &events {
            trace!("t={} {:?}", self.ctx.now, event);
        }

        self.ctx.advance_time(1);
        events
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn running(&self) -> Option<TaskId> {
        self.scheduler.running()
    }

    pub fn is_finished(&self) -> bool {
        self.scheduler.is_finished()
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
