use log::{debug, trace};
use slotmap::{SlotMap, new_key_type};

use super::event::{PreemptReason, SchedEvent};

pub type Ticks = u64;

new_key_type! {
    pub struct TaskId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Created, not yet admitted to a scheduler
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub state: TaskState,
    pub total_work: u64,
    pub progress: u64,
    pub arrival: Ticks,
    pub first_run: Option<Ticks>,
    pub completion: Option<Ticks>,
}

impl Task {
    pub fn remaining_work(&self) -> u64 {
        self.total_work - self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress == self.total_work
    }

    /// `completion - arrival`, once the task has completed.
    pub fn waiting_time(&self) -> Option<Ticks> {
        self.completion.map(|c| c - self.arrival)
    }

    /// `first_run - arrival`, once the task has been dispatched.
    pub fn response_time(&self) -> Option<Ticks> {
        self.first_run.map(|r| r - self.arrival)
    }
}

/// Run-scoped simulation state. Owns every task; schedulers only hold ids.
///
/// All placement transitions (`admit`, `mark_ready`, `set_running`,
/// `mark_completed`) assert that the task is coming from a legal state, so a
/// task can never sit in two places at once or be revived after it departed.
#[derive(Debug, Default)]
pub struct SimCtx {
    pub now: Ticks,
    pub tasks: SlotMap<TaskId, Task>,
    pub total_admitted: u64,
    pub cumulative_waiting_time: Ticks,
    events: Vec<SchedEvent>,
}

impl SimCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_task(&mut self, total_work: u64, arrival: Ticks) -> TaskId {
        assert!(total_work > 0, "Task must require at least one unit of work");

        self.tasks.insert_with_key(|id| Task {
            id,
            state: TaskState::Pending,
            total_work,
            progress: 0,
            arrival,
            first_run: None,
            completion: None,
        })
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        self.tasks.get(task_id).expect("Unknown task id")
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        self.tasks.get_mut(task_id).expect("Unknown task id")
    }

    // Count the admission; the scheduler decides where the task goes next
    pub fn admit(&mut self, task_id: TaskId) {
        let now = self.now;
        let task = self.task_mut(task_id);
        assert_eq!(
            task.state,
            TaskState::Pending,
            "Task {task_id:?} admitted twice"
        );
        assert!(
            task.arrival <= now,
            "Task {task_id:?} admitted before its arrival tick"
        );
        debug!("t={now} admit {task_id:?} work={}", task.total_work);

        self.total_admitted += 1;
        self.emit(SchedEvent::Admitted { task: task_id });
    }

    pub fn mark_ready(&mut self, task_id: TaskId) {
        let task = self.task_mut(task_id);
        assert!(
            matches!(task.state, TaskState::Pending | TaskState::Running),
            "Task {task_id:?} cannot become ready from {:?}",
            task.state
        );
        task.state = TaskState::Ready;
    }

    /// Running -> Ready, recording why.
    pub fn preempt(&mut self, task_id: TaskId, reason: PreemptReason) {
        assert_eq!(
            self.task(task_id).state,
            TaskState::Running,
            "Only the running task can be preempted"
        );
        self.mark_ready(task_id);
        debug!("t={} preempt {task_id:?} ({reason:?})", self.now);
        self.emit(SchedEvent::Preempted {
            task: task_id,
            reason,
        });
    }

    pub fn set_running(&mut self, task_id: TaskId) {
        let now = self.now;
        let task = self.task_mut(task_id);
        assert!(
            matches!(task.state, TaskState::Pending | TaskState::Ready),
            "Task {task_id:?} cannot run from {:?}",
            task.state
        );
        task.state = TaskState::Running;
        task.first_run.get_or_insert(now);
        trace!("t={now} dispatch {task_id:?}");
        self.emit(SchedEvent::Dispatched { task: task_id });
    }

    /// One unit of work on the running task. Returns whether it is now complete.
    pub fn do_work(&mut self, task_id: TaskId) -> bool {
        let task = self.task_mut(task_id);
        debug_assert_eq!(task.state, TaskState::Running);
        assert!(
            !task.is_complete(),
            "Task {task_id:?} ran past its total work"
        );
        task.progress += 1;
        task.is_complete()
    }

    pub fn mark_completed(&mut self, task_id: TaskId) {
        let now = self.now;
        let task = self.task_mut(task_id);
        assert_eq!(
            task.state,
            TaskState::Running,
            "Task {task_id:?} must be running to complete"
        );
        assert!(task.completion.is_none(), "Task {task_id:?} completed twice");
        debug_assert!(task.is_complete());

        task.state = TaskState::Completed;
        task.completion = Some(now);
        let waiting = now - task.arrival;

        self.cumulative_waiting_time += waiting;
        debug!("t={now} complete {task_id:?} waiting={waiting}");
        self.emit(SchedEvent::Completed {
            task: task_id,
            waiting,
        });
    }

    pub fn emit(&mut self, event: SchedEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<SchedEvent> {
        std::mem::take(&mut self.events)
    }
}
