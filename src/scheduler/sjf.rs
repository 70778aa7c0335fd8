use super::{QueueOrder, ReadyQueue, Scheduler, work_one};
use crate::core::{SchedEvent, SimCtx, TaskId};

/// Non-preemptive shortest job first. The ready queue is re-sorted by total
/// work on every admission, so dispatch just takes the front.
#[derive(Debug, Default)]
pub struct ShortestJobFirst {
    ready: ReadyQueue,
    running: Option<TaskId>,
}

impl ShortestJobFirst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for ShortestJobFirst {
    fn name(&self) -> &'static str {
        "shortest_job_first"
    }

    fn queue_order(&self) -> QueueOrder {
        QueueOrder::TotalWork
    }

    fn admit(&mut self, ctx: &mut SimCtx, task: TaskId) {
        ctx.admit(task);
        ctx.mark_ready(task);
        self.ready.push_back(ctx, task);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_job_is_not_interrupted_by_short_arrival() {
        let mut ctx = SimCtx::new();
        let mut sjf = ShortestJobFirst::new();
        let a = ctx.create_task(5, 0);
        let b = ctx.create_task(2, 1);

        let mut ran = Vec::new();
        while ctx.now < 8 {
            if ctx.now == 0 {
                sjf.admit(&mut ctx, a);
            }
            if ctx.now == 1 {
                sjf.admit(&mut ctx, b);
            }
            ran.push(sjf.running());
            sjf.advance(&mut ctx);
            ctx.advance_time(1);
        }

        // tick 0 dispatches a; a works 1..=5, b works 6..=7
        let a_ticks: Vec<_> = (1..=5).map(|t| ran[t]).collect();
        assert!(a_ticks.iter().all(|&r| r == Some(a)));
        assert_eq!(ran[6], Some(b));
        assert_eq!(ran[7], Some(b));
        assert_eq!(ctx.task(a).completion, Some(5));
        assert_eq!(ctx.task(b).completion, Some(7));
        assert_eq!(ctx.cumulative_waiting_time, 5 + 6);
        assert!(sjf.is_finished());
    }

    #[test]
    fn admission_keeps_queue_sorted_by_total_work() {
        let mut ctx = SimCtx::new();
        let mut sjf = ShortestJobFirst::new();
        let works = [7, 3, 9, 3, 1];
        let ids: Vec<_> = works.iter().map(|&w| ctx.create_task(w, 0)).collect();

        for &id in &ids {
            sjf.admit(&mut ctx, id);
            assert!(sjf.ready().is_sorted(&ctx, QueueOrder::TotalWork));
        }

        // equal work keeps admission order
        let order: Vec<_> = sjf.ready().iter().collect();
        assert_eq!(order, vec![ids[4], ids[1], ids[3], ids[0], ids[2]]);
        assert_eq!(ctx.total_admitted, 5);
    }

    #[test]
    fn dispatch_takes_shortest_ready_job() {
        let mut ctx = SimCtx::new();
        let mut sjf = ShortestJobFirst::new();
        let long = ctx.create_task(8, 0);
        let short = ctx.create_task(2, 0);
        sjf.admit(&mut ctx, long);
        sjf.admit(&mut ctx, short);

        sjf.advance(&mut ctx);
        assert_eq!(sjf.running(), Some(short));
        assert_eq!(sjf.ready().front(), Some(long));
    }

    #[test]
    fn reads_are_pure() {
        let mut ctx = SimCtx::new();
        let mut sjf = ShortestJobFirst::new();
        let a = ctx.create_task(3, 0);
        sjf.admit(&mut ctx, a);
        sjf.advance(&mut ctx);

        assert_eq!(sjf.running(), sjf.running());
        assert_eq!(sjf.is_finished(), sjf.is_finished());
        assert_eq!(ctx.task(a).progress, 0);
    }
}
