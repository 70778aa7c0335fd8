pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::{PreemptReason, SchedEvent};
pub use observer::Observer;
pub use state::{SimCtx, Task, TaskId, TaskState, Ticks};
