use super::{QueueOrder, ReadyQueue, Scheduler, work_one};
use crate::core::{PreemptReason, SchedEvent, SimCtx, TaskId};

/// Preemptive shortest remaining time first.
///
/// A new arrival displaces the running task on admission when the running
/// task has strictly more work left than the arrival's total work. There is
/// no time slice; otherwise this ticks exactly like [`ShortestJobFirst`].
///
/// [`ShortestJobFirst`]: super::ShortestJobFirst
#[derive(Debug, Default)]
pub struct ShortestRemainingTimeFirst {
    ready: ReadyQueue,
    running: Option<TaskId>,
}

impl ShortestRemainingTimeFirst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ShortestRemainingTimeFirst {
    fn name(&self) -> &'static str {
        "shortest_remaining_time_first"
    }

    fn queue_order(&self) -> QueueOrder {
        QueueOrder::RemainingWork
    }

    fn admit(&mut self, ctx: &mut SimCtx, task: TaskId) {
        ctx.admit(task);
        let arrival_work = ctx.task(task).total_work;

        match self.running {
            Some(current) if ctx.task(current).remaining_work() > arrival_work => {
                ctx.preempt(current, PreemptReason::ShorterArrival);
                self.ready.push_back(ctx, current);
                ctx.set_running(task);
                self.running = Some(task);
            }
            _ => {
                ctx.mark_ready(task);
                self.ready.push_back(ctx, task);
            }
        }

        self.ready.sort(ctx, self.queue_order());
    }

    fn advance(&mut self, ctx: &mut SimCtx) {
        let Some(task) = self.running else {
            self.dispatch(ctx);
            if self.running.is_none() {
                ctx.emit(SchedEvent::Idle);
            }
            return;
        };

        if work_one(ctx, task) {
            self.dispatch(ctx);
        }
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) {
        self.running = self.ready.dispatch_front(ctx);
    }

    fn running(&self) -> Option<TaskId> {
        self.running
    }

    fn ready(&self) -> &ReadyQueue {
        &self.ready
    }
}
