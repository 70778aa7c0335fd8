use std::collections::VecDeque;

use crate::core::{SimCtx, Task, TaskId, TaskState};

/// Sort key a ready queue keeps itself ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOrder {
    /// Insertion order, never sorted
    Fifo,
    /// Ascending `total_work`
    TotalWork,
    /// Ascending `remaining_work()`
    RemainingWork,
}

impl QueueOrder {
    pub fn key(self, task: &Task) -> Option<u64> {
        match self {
            Self::Fifo => None,
            Self::TotalWork => Some(task.total_work),
            Self::RemainingWork => Some(task.remaining_work()),
        }
    }
}

/// Tasks that are admitted but not running.
///
/// Sorting is always stable, so equal keys keep the order in which they were
/// pushed. A task pushed back after preemption therefore lands behind every
/// queued task with the same key.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    tasks: VecDeque<TaskId>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, ctx: &SimCtx, task_id: TaskId) {
        debug_assert_eq!(
            ctx.task(task_id).state,
            TaskState::Ready,
            "Task {task_id:?} must be marked ready before it is queued"
        );
        debug_assert!(
            !self.tasks.contains(&task_id),
            "Task {task_id:?} already present in ready queue"
        );
        self.tasks.push_back(task_id);
    }

    pub fn pop_front(&mut self) -> Option<TaskId> {
        self.tasks.pop_front()
    }

    /// Pops the front task and makes it the running task.
    pub fn dispatch_front(&mut self, ctx: &mut SimCtx) -> Option<TaskId> {
        let task = self.pop_front()?;
        ctx.set_running(task);
        Some(task)
    }

    pub fn sort(&mut self, ctx: &SimCtx, order: QueueOrder) {
        if order == QueueOrder::Fifo {
            return;
        }
        self.tasks
            .make_contiguous()
            .sort_by_key(|&id| order.key(ctx.task(id)));
    }

    pub fn is_sorted(&self, ctx: &SimCtx, order: QueueOrder) -> bool {
        self.tasks
            .iter()
            .zip(self.tasks.iter().skip(1))
            .all(|(&a, &b)| order.key(ctx.task(a)) <= order.key(ctx.task(b)))
    }

    pub fn front(&self) -> Option<TaskId> {
        self.tasks.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.tasks.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
