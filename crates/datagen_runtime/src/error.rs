use std::borrow::Cow;

use datagen_core::error::{CoreError, Severity};
use thiserror::Error;

pub fn log_core_error(err: CoreError) {
    match err.severity {
        Severity::Trace => tracing::trace!("{err}"),
        Severity::Debug => tracing::debug!("{err}"),
        Severity::Info => tracing::info!("{err}"),
        Severity::Warn => tracing::warn!("{err}"),
        Severity::Error | Severity::Fatal => tracing::error!("{err}"),
    }
}

/// Failure reported by a channel write capability.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{message}")]
pub struct WriteFault {
    message: Cow<'static, str>,
}

impl WriteFault {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why a worker thread stopped without being asked to.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum WorkerFault {
    /// A channel write failed; the loop does not retry.
    #[error("write to channel `{channel}` failed: {source}")]
    Write { channel: String, source: WriteFault },

    /// The loop body panicked.
    #[error("worker panicked: {message}")]
    Panic { message: String },
}

impl WorkerFault {
    /// Short stable label for logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkerFault::Write { .. } => "write_fault",
            WorkerFault::Panic { .. } => "worker_panic",
        }
    }

    /// Channel whose write failed, if that is the cause.
    pub fn channel(&self) -> Option<&str> {
        match self {
            WorkerFault::Write { channel, .. } => Some(channel),
            WorkerFault::Panic { .. } => None,
        }
    }
}
