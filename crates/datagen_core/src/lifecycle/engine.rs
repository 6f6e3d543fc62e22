use crate::error::{CoreError, Result};

use super::{State, Transition};

/// Apply `via` to `current` and return the resulting state.
///
/// This enforces:
/// - `Start` only from `Idle` (anything else is `AlreadyStarted`)
/// - `Stop` from `Running`, and idempotently from `Stopping`
/// - `Joined` only while `Stopping`
/// - `WorkerLost` only while `Running` (a loss during `Stopping` is expected)
/// - nothing leaves `Stopped` or `Aborted`
pub fn next_state(current: State, via: Transition) -> Result<State> {
    use State::*;
    use Transition::*;

    let next = match (current, via) {
        (Idle, Start) => Running,
        (_, Start) => {
            return Err(CoreError::already_started(current.id(), via.id()));
        }

        (Running, Stop) => Stopping,
        (Stopping, Stop) => Stopping,

        (Stopping, Joined) => Stopped,
        (Running, WorkerLost) => Aborted,

        _ => {
            return Err(CoreError::invalid_transition_lifecycle(
                current.id(),
                via.id(),
            ));
        }
    };

    Ok(next)
}

/// Expected goal state when `transition` is taken from `start`.
pub fn goal_state_for_transition(start: State, transition: Transition) -> Result<State> {
    next_state(start, transition)
}

/// Get the list of transitions accepted from a given state.
///
/// Terminal states return an empty list: a fresh generator must be created.
pub fn available_transitions(state: State) -> &'static [Transition] {
    use State::*;
    use Transition::*;

    match state {
        Idle => &[Start],
        Running => &[Stop, WorkerLost],
        Stopping => &[Stop, Joined],
        Stopped | Aborted => &[],
    }
}
