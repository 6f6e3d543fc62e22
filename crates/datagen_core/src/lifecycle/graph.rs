use crate::error::Result;

use super::{available_transitions, goal_state_for_transition, State, Transition, ALL_STATES};

/// Lifecycle transition graph derived from the state/transition tables.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransitionGraph {
    pub states: Vec<State>,
    pub transitions: Vec<TransitionEdge>,
}

/// Directed lifecycle transition edge.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TransitionEdge {
    pub start: State,
    pub transition: Transition,
    pub goal: State,
}

impl TransitionGraph {
    /// Edges leaving `state`.
    pub fn edges_from(&self, state: State) -> impl Iterator<Item = &TransitionEdge> + '_ {
        self.transitions.iter().filter(move |edge| edge.start == state)
    }
}

/// Build the canonical lifecycle transition graph.
pub fn transition_graph() -> Result<TransitionGraph> {
    let mut transitions = Vec::new();

    for state in ALL_STATES {
        for transition in available_transitions(state) {
            let goal = goal_state_for_transition(state, *transition)?;
            transitions.push(TransitionEdge {
                start: state,
                transition: *transition,
                goal,
            });
        }
    }

    Ok(TransitionGraph {
        states: ALL_STATES.to_vec(),
        transitions,
    })
}
