//! Lifecycle event types (host-agnostic).
//!
//! Host integrations subscribe and map these onto their own event system.

use super::WorkerOutcome;

/// Emitted by a generator as its lifecycle progresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The worker thread was spawned.
    Started,
    /// A requested stop completed; the worker is joined.
    Stopped,
    /// The worker ended without a requested stop. Emitted at most once.
    WorkerTerminated(WorkerOutcome),
}

impl LifecycleEvent {
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleEvent::Started => "started",
            LifecycleEvent::Stopped => "stopped",
            LifecycleEvent::WorkerTerminated(_) => "worker_terminated",
        }
    }
}
