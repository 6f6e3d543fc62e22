use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use datagen_core::config::GeneratorConfig;
use tokio::sync::broadcast;

use super::LifecycleEvent;

/// Capabilities a generator needs from the component framework hosting it.
pub trait GeneratorHost: Send {
    /// Report a lifecycle event.
    fn emit(&mut self, event: LifecycleEvent);

    /// Ask the host to interrupt the owning component.
    fn request_abort(&mut self);
}

/// Latched "abort requested" flag shared with the host.
#[derive(Debug, Default)]
pub struct AbortRequest {
    requested: AtomicBool,
}

impl AbortRequest {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

/// Host that fans lifecycle events out on a broadcast channel.
///
/// broadcast is used so:
/// - the supervisor never blocks on a slow event consumer
/// - lagging receivers drop old events rather than stalling the tick
#[derive(Debug)]
pub struct BroadcastHost {
    events: broadcast::Sender<LifecycleEvent>,
    abort: Arc<AbortRequest>,
}

impl BroadcastHost {
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let (events, _rx) = broadcast::channel(capacity.max(1));
        Self {
            events,
            abort: Arc::new(AbortRequest::new()),
        }
    }

    /// Host sized by `config.event_capacity`.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.event_capacity)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.events.subscribe()
    }

    /// Shared abort flag, set when the supervisor gives up on the worker.
    pub fn abort_request(&self) -> Arc<AbortRequest> {
        Arc::clone(&self.abort)
    }
}

impl GeneratorHost for BroadcastHost {
    fn emit(&mut self, event: LifecycleEvent) {
        // No receivers is fine; events are best-effort for observers.
        let _ = self.events.send(event);
    }

    fn request_abort(&mut self) {
        self.abort.request();
    }
}
