//! Value hand-off between the controlling thread and a worker loop.

mod channels;
mod set;
mod store;

pub use channels::ChannelSet;
pub use set::{Iter, ValueSet};
pub use store::{ValueSource, ValueStore};
