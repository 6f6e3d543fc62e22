//! Generator component models: which ports a generator has and which of
//! them are writable channels.

mod generator;
mod port;
mod service;

pub use generator::{GeneratorModel, GeneratorModels, ModelSource, DEFAULT_CHANNEL};
pub use port::{PortDirection, PortSpec};
pub use service::DataService;
