//! datagen_core::lifecycle
//!
//! Host-agnostic lifecycle semantics for a generator component.
//! This module contains **no** thread spawning or host integration.
//!
//! Key ideas:
//! - `Idle -> Running -> Stopping -> Stopped`, plus `Running -> Aborted`
//! - Terminal states are final; restarting needs a fresh instance
//! - The runtime crate owns the worker thread and applies these tables

mod engine;
mod exit;
mod graph;
mod state;
mod transition;

pub use engine::{available_transitions, goal_state_for_transition, next_state};
pub use exit::ExitSignal;
pub use graph::{transition_graph, TransitionEdge, TransitionGraph};
pub use state::{State, ALL_STATES};
pub use transition::{Transition, ALL_TRANSITIONS};
