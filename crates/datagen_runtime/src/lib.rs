//! datagen_runtime
//!
//! Threaded periodic generators built on `datagen_core`: a worker thread
//! writes the current value set on every output channel, and a supervisor
//! driven by host ticks turns unexpected worker termination into lifecycle
//! events.

pub mod error;
pub mod generator;

// Re-export core types that runtime users will commonly need
pub use datagen_core::config::{GeneratorConfig, GeneratorKind};
pub use datagen_core::error::{CoreError, ErrorKind, Result};
pub use datagen_core::lifecycle::{State, Transition};
pub use datagen_core::model::{DataService, GeneratorModel, GeneratorModels};
pub use datagen_core::values::{ChannelSet, ValueSet, ValueStore};
