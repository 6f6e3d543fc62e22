//! Generator runtime: the worker thread and the supervising component.

mod events;
mod host;
mod supervisor;
mod wait;
mod worker;
mod writer;

pub use events::LifecycleEvent;
pub use host::{AbortRequest, BroadcastHost, GeneratorHost};
pub use supervisor::DataGenerator;
pub use wait::{PeriodWait, StepWait, SystemWait};
pub use worker::{run_loop, WorkerHandle, WorkerOutcome};
pub use writer::ChannelWriter;
