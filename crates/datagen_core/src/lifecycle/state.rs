/// Generator lifecycle states.
///
/// Stable states:
/// - Idle (construction), Running
///
/// Transitional:
/// - Stopping (exit requested, worker not joined yet)
///
/// Terminal:
/// - Stopped (requested stop completed), Aborted (worker died unexpectedly)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum State {
    Idle,
    Running,
    Stopping,
    Stopped,
    Aborted,
}

/// Internal, compact IDs used for error payloads.
impl State {
    pub const fn id(self) -> u8 {
        match self {
            State::Idle => 0,
            State::Running => 1,
            State::Stopping => 2,
            State::Stopped => 3,
            State::Aborted => 4,
        }
    }

    /// True once no transition can leave the state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, State::Stopped | State::Aborted)
    }

    /// True while a worker thread exists (spawned, not yet joined).
    pub const fn has_worker(self) -> bool {
        matches!(self, State::Running | State::Stopping)
    }

    /// Stable, human-readable label for host-facing adapters.
    pub const fn label(self) -> &'static str {
        match self {
            State::Idle => "Idle",
            State::Running => "Running",
            State::Stopping => "Stopping",
            State::Stopped => "Stopped",
            State::Aborted => "Aborted",
        }
    }
}

/// Canonical list of all lifecycle states.
pub const ALL_STATES: [State; 5] = [
    State::Idle,
    State::Running,
    State::Stopping,
    State::Stopped,
    State::Aborted,
];
