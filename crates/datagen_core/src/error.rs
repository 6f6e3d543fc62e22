use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Convenient result alias for datagen_core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Log/handling importance. Maps onto logging levels in the runtime crate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Where an error came from (helps triage and routing).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Lifecycle,
    Values,
    Worker,
    Model,
    Config,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    InvalidTransition,
    AlreadyStarted,
    UnknownChannel,
    Io,
    Other,
}

/// Optional structured payload for rich context without forcing allocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Generic key/value context (usually no heap alloc if using &str).
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// Lifecycle-specific context.
    LifecycleTransition {
        from_state: u8,
        via_transition: u8,
    },

    /// Channel name a value set referred to.
    Channel(String),
}

/// The one error type that crosses module boundaries in datagen_core.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl CoreError {
    // ---------------- Fluent entry points ----------------

    #[inline]
    pub fn warn() -> ErrB {
        ErrB::new(Severity::Warn)
    }
    #[inline]
    pub fn error() -> ErrB {
        ErrB::new(Severity::Error)
    }

    /// Construct a lifecycle InvalidTransition error with structured context.
    pub fn invalid_transition_lifecycle(from_state: u8, via_transition: u8) -> Self {
        CoreError::warn()
            .domain(Domain::Lifecycle)
            .kind(ErrorKind::InvalidTransition)
            .msg("invalid lifecycle transition")
            .payload(Payload::LifecycleTransition {
                from_state,
                via_transition,
            })
            .build()
    }

    /// `start` called on a generator that already left `Idle`.
    pub fn already_started(from_state: u8, via_transition: u8) -> Self {
        CoreError::warn()
            .domain(Domain::Lifecycle)
            .kind(ErrorKind::AlreadyStarted)
            .msg("generator already started")
            .payload(Payload::LifecycleTransition {
                from_state,
                via_transition,
            })
            .build()
    }

    /// A value set names a channel the component does not have.
    pub fn unknown_channel(name: impl Into<String>) -> Self {
        let name = name.into();
        CoreError::warn()
            .domain(Domain::Values)
            .kind(ErrorKind::UnknownChannel)
            .msgf(format_args!("`{name}` is not a known channel"))
            .payload(Payload::Channel(name))
            .build()
    }

    /// Name of the offending channel, for `UnknownChannel` errors.
    pub fn channel(&self) -> Option<&str> {
        match &self.payload {
            Payload::Channel(name) => Some(name),
            _ => None,
        }
    }
}

/// Fluent builder that behaves like iterator chains (takes self, returns Self).
/// Defaults:
/// - domain = Other
/// - kind = Other
/// - message = ""
/// - payload = None
#[derive(Debug, Clone)]
pub struct ErrB {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrB {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    /// Set/override the domain (defaults to Domain::Other).
    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    /// Set/override the kind (defaults to ErrorKind::Other).
    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    /// Set/override the message (defaults to "").
    #[inline]
    pub fn msg(mut self, m: impl Into<Cow<'static, str>>) -> Self {
        self.message = m.into();
        self
    }

    /// Formatting-friendly message setter.
    #[inline]
    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    /// Only one payload: this replaces any previous payload (default is None).
    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    #[inline]
    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::error()
            .domain(Domain::Other)
            .kind(ErrorKind::Io)
            .msg("io error")
            .payload(Payload::Context {
                key: "io",
                value: e.to_string().into(),
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_channel_carries_name() {
        let err = CoreError::unknown_channel("nope");
        assert_eq!(err.kind, ErrorKind::UnknownChannel);
        assert_eq!(err.domain, Domain::Values);
        assert_eq!(err.channel(), Some("nope"));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn builder_defaults_to_other() {
        let err = CoreError::error().msg("boom").build();
        assert_eq!(err.domain, Domain::Other);
        assert_eq!(err.kind, ErrorKind::Other);
        assert_eq!(err.payload, Payload::None);
        assert_eq!(err.to_string(), "Error: boom");
    }

    #[test]
    fn io_errors_keep_their_text() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "spawn refused");
        let err = CoreError::from(io);
        assert_eq!(err.kind, ErrorKind::Io);
        match err.payload {
            Payload::Context { key, value } => {
                assert_eq!(key, "io");
                assert!(value.contains("spawn refused"));
            }
            other => panic!("expected io context, got {other:?}"),
        }
    }
}
