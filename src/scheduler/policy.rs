use super::{
    QueueOrder, ReadyQueue, RoundRobin, Scheduler, ShortestJobFirst, ShortestRemainingTimeFirst,
};
use crate::core::{SimCtx, TaskId};

/// Runtime-selected policy, for drivers that pick the algorithm from config.
#[derive(Debug)]
pub enum Policy {
    RoundRobin(RoundRobin),
    ShortestJobFirst(ShortestJobFirst),
    ShortestRemainingTimeFirst(ShortestRemainingTimeFirst),
}

macro_rules! each_policy {
    ($policy:expr, $inner:ident => $body:expr) => {
        match $policy {
            Policy::RoundRobin($inner) => $body,
            Policy::ShortestJobFirst($inner) => $body,
            Policy::ShortestRemainingTimeFirst($inner) => $body,
        }
    };
}

impl Scheduler for Policy {
    fn name(&self) -> &'static str {
        each_policy!(self, s => s.name())
    }

    fn queue_order(&self) -> QueueOrder {
        each_policy!(self, s => s.queue_order())
    }

    fn admit(&mut self, ctx: &mut SimCtx, task: TaskId) {
        each_policy!(self, s => s.admit(ctx, task))
    }

    fn advance(&mut self, ctx: &mut SimCtx) {
        each_policy!(self, s => s.advance(ctx))
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) {
        each_policy!(self, s => s.dispatch(ctx))
    }

    fn running(&self) -> Option<TaskId> {
        each_policy!(self, s => s.running())
    }

    fn ready(&self) -> &ReadyQueue {
        each_policy!(self, s => s.ready())
    }
}

impl From<RoundRobin> for Policy {
    fn from(s: RoundRobin) -> Self {
        Self::RoundRobin(s)
    }
}

impl From<ShortestJobFirst> for Policy {
    fn from(s: ShortestJobFirst) -> Self {
        Self::ShortestJobFirst(s)
    }
}

impl From<ShortestRemainingTimeFirst> for Policy {
    fn from(s: ShortestRemainingTimeFirst) -> Self {
        Self::ShortestRemainingTimeFirst(s)
    }
}
