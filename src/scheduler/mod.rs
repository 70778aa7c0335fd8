pub mod policy;
pub mod queue;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

use crate::core::{SimCtx, TaskId};
pub use policy::Policy;
pub use queue::{QueueOrder, ReadyQueue};
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;
pub use srtf::ShortestRemainingTimeFirst;

/// A dispatch policy. The driver calls `admit` for each arrival and then
/// `advance` exactly once per tick; the policy decides what runs.
pub trait Scheduler {
    fn name(&self) -> &'static str;

    /// Ordering the ready queue maintains after every mutation.
    fn queue_order(&self) -> QueueOrder;

    fn admit(&mut self, ctx: &mut SimCtx, task: TaskId);

    fn advance(&mut self, ctx: &mut SimCtx);

    fn dispatch(&mut self, ctx: &mut SimCtx);

    fn running(&self) -> Option<TaskId>;

    fn ready(&self) -> &ReadyQueue;

    fn is_finished(&self) -> bool {
        self.ready().is_empty() && self.running().is_none()
    }
}

// One unit of work; records completion stats if that finished the task
pub(crate) fn work_one(ctx: &mut SimCtx, task: TaskId) -> bool {
    let completed = ctx.do_work(task);
    if completed {
        ctx.mark_completed(task);
    }
    completed
}
