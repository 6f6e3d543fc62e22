use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::{CoreError, Domain, ErrorKind, Result};

use super::{ChannelSet, ValueSet};

/// Read side of the value hand-off, as seen by a worker loop.
pub trait ValueSource<V>: Send + Sync + 'static {
    /// Most recently installed snapshot, or `None` before the first one.
    fn current(&self) -> Option<Arc<ValueSet<V>>>;
}

/// Single-slot store holding the value set a generator publishes.
///
/// Replacement swaps one `Arc<ValueSet>` for another, so a reader always
/// gets a complete snapshot: either the previous set or the new one. Reads
/// never wait on writers and writers never wait on readers.
///
/// Concurrent `replace` calls race freely; the last one to install wins.
/// The frozen flag lives in the same slot as the values, so a `replace`
/// either lands before `freeze` or is rejected.
#[derive(Debug)]
pub struct ValueStore<V> {
    channels: Arc<ChannelSet>,
    slot: ArcSwap<Slot<V>>,
}

#[derive(Debug)]
struct Slot<V> {
    values: Option<Arc<ValueSet<V>>>,
    frozen: bool,
}

impl<V> ValueStore<V> {
    /// Empty store accepting only keys from `channels`.
    pub fn new(channels: Arc<ChannelSet>) -> Self {
        Self {
            channels,
            slot: ArcSwap::from_pointee(Slot {
                values: None,
                frozen: false,
            }),
        }
    }

    /// Validate `values` against the known channels and install it.
    ///
    /// On error the previously installed set stays in place.
    pub fn replace(&self, values: ValueSet<V>) -> Result<()> {
        values.validate_against(&self.channels)?;
        let values = Arc::new(values);

        let mut current = self.slot.load();
        loop {
            if current.frozen {
                return Err(CoreError::warn()
                    .domain(Domain::Values)
                    .kind(ErrorKind::InvalidState)
                    .msg("values are fixed once a constant generator is started")
                    .build());
            }
            let next = Arc::new(Slot {
                values: Some(Arc::clone(&values)),
                frozen: false,
            });
            let previous = self.slot.compare_and_swap(&*current, next);
            if Arc::ptr_eq(&*previous, &*current) {
                return Ok(());
            }
            current = previous;
        }
    }

    /// Most recently installed snapshot, or `None` if never configured.
    pub fn current(&self) -> Option<Arc<ValueSet<V>>> {
        self.slot.load().values.clone()
    }

    /// Reject every later `replace`.
    pub fn freeze(&self) {
        self.slot.rcu(|slot| Slot {
            values: slot.values.clone(),
            frozen: true,
        });
    }

    pub fn is_frozen(&self) -> bool {
        self.slot.load().frozen
    }

    pub fn channels(&self) -> &Arc<ChannelSet> {
        &self.channels
    }
}

impl<V> ValueSource<V> for ValueStore<V>
where
    V: Send + Sync + 'static,
{
    fn current(&self) -> Option<Arc<ValueSet<V>>> {
        ValueStore::current(self)
    }
}
