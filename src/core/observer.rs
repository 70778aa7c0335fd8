use rustc_hash::FxHashMap;

use super::state::{SimCtx, TaskId, TaskState};
use crate::scheduler::{QueueOrder, Scheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Ready,
    Running,
}

/// Checks run-wide invariants after every tick.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe<S: Scheduler + ?Sized>(&mut self, ctx: &SimCtx, scheduler: &S) {
        self.step += 1;

        let mut census: FxHashMap<TaskId, Placement> = FxHashMap::default();
        if let Some(task_id) = scheduler.running() {
            census.insert(task_id, Placement::Running);
        }
        for task_id in scheduler.ready().iter() {
            let previous = census.insert(task_id, Placement::Ready);
            debug_assert!(
                previous.is_none(),
                "Task {task_id:?} held twice by the scheduler ({previous:?} and Ready)"
            );
        }

        let mut admitted = 0;
        let mut waiting_sum = 0;
        for (task_id, task) in &ctx.tasks {
            let placement = census.get(&task_id).copied();
            match task.state {
                TaskState::Pending | TaskState::Completed => debug_assert_eq!(
                    placement, None,
                    "{:?} task {task_id:?} still held by the scheduler",
                    task.state
                ),
                TaskState::Ready => debug_assert_eq!(
                    placement,
                    Some(Placement::Ready),
                    "Ready task {task_id:?} lost from the ready queue"
                ),
                TaskState::Running => debug_assert_eq!(
                    placement,
                    Some(Placement::Running),
                    "Task {task_id:?} marked running but not in the running slot"
                ),
            }

            debug_assert!(task.progress <= task.total_work);
            if task.state != TaskState::Pending {
                admitted += 1;
            }
            if task.state == TaskState::Completed {
                debug_assert!(task.is_complete(), "Task {task_id:?} departed unfinished");
                waiting_sum += task.waiting_time().unwrap_or_default();
            }
        }

        debug_assert!(
            census.keys().all(|&task_id| ctx.tasks.contains_key(task_id)),
            "Scheduler references unknown tasks"
        );
        debug_assert_eq!(admitted, ctx.total_admitted, "Admission count drifted");
        debug_assert_eq!(
            waiting_sum, ctx.cumulative_waiting_time,
            "Cumulative waiting time drifted"
        );

        let order = scheduler.queue_order();
        if order != QueueOrder::Fifo {
            debug_assert!(
                scheduler.ready().is_sorted(ctx, order),
                "Ready queue out of {order:?} order at step {}",
                self.step
            );
        }
    }
}
