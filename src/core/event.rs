use crate::core::{TaskId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreemptReason {
    // Round Robin quantum used up
    SliceExpired,
    // SRTF: a new arrival needs less work than the running task has left
    ShorterArrival,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Admitted {
        task: TaskId,
    },
    Dispatched {
        task: TaskId,
    },
    Preempted {
        task: TaskId,
        reason: PreemptReason,
    },
    Completed {
        task: TaskId,
        waiting: Ticks,
    },
    // Nothing running and nothing left to dispatch
    Idle,
}
