use std::time::Duration;

use crate::error::{CoreError, Domain, ErrorKind, Result};

/// Default write period (0.1 s).
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

/// Default capacity of the lifecycle event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 32;

pub const DEFAULT_THREAD_NAME: &str = "datagen-worker";

/// Whether a generator's values may change once it runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum GeneratorKind {
    /// Values can be replaced at any time.
    #[default]
    Dynamic,
    /// Values are fixed when the generator starts.
    Constant,
}

/// Per-instance generator settings.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GeneratorConfig {
    pub period: Duration,
    pub kind: GeneratorKind,
    pub event_capacity: usize,
    pub thread_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            kind: GeneratorKind::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn with_kind(mut self, kind: GeneratorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Reject settings a worker cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.period.is_zero() {
            return Err(invalid_config("period must be strictly positive"));
        }
        if self.event_capacity == 0 {
            return Err(invalid_config("event capacity must be at least 1"));
        }
        if self.thread_name.is_empty() || self.thread_name.contains('\0') {
            return Err(invalid_config("worker thread name must be non-empty and NUL-free"));
        }
        Ok(())
    }
}

fn invalid_config(msg: &'static str) -> CoreError {
    CoreError::warn()
        .domain(Domain::Config)
        .kind(ErrorKind::InvalidArgument)
        .msg(msg)
        .build()
}
