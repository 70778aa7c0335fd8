use super::{QueueOrder, ReadyQueue, Scheduler, work_one};
use crate::core::{PreemptReason, SchedEvent, SimCtx, TaskId, Ticks};

/// FIFO ready queue with a fixed time slice.
///
/// The slice counter is bumped after every tick of work, including the tick
/// in which the running task completes and a successor was dispatched. That
/// successor therefore starts with one slice tick already used.
#[derive(Debug)]
pub struct RoundRobin {
    ready: ReadyQueue,
    running: Option<TaskId>,
    quantum: Ticks,
    slice_used: Ticks,
}

impl RoundRobin {
    pub fn new(quantum: Ticks) -> Self {
        assert!(quantum > 0, "Round Robin quantum must be positive");
        Self {
            ready: ReadyQueue::new(),
            running: None,
            quantum,
            slice_used: 0,
        }
    }

    pub fn slice_used(&self) -> Ticks {
        self.slice_used
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn queue_order(&self) -> QueueOrder {
        QueueOrder::Fifo
    }

    fn admit(&mut self, ctx: &mut SimCtx, task: TaskId) {
        ctx.admit(task);
        ctx.mark_ready(task);
        self.ready.push_back(ctx, task);
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

        self.slice_used += 1;

        if self.slice_used >= self.quantum {
            // Only whatever is running now can expire; a task that just
            // completed has already departed.
            if let Some(expired) = self.running {
                ctx.preempt(expired, PreemptReason::SliceExpired);
                self.ready.push_back(ctx, expired);
                self.dispatch(ctx);
            }
        }
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) {
        self.running = self.ready.dispatch_front(ctx);
        self.slice_used = 0;
    }

    fn running(&self) -> Option<TaskId> {
        self.running
    }

    fn ready(&self) -> &ReadyQueue {
        &self.ready
    }
}
