use std::collections::BTreeSet;

use crate::error::{CoreError, Domain, ErrorKind, Result};

/// The fixed set of output channels a generator can write to.
///
/// Captured once per component instance; nothing can add or remove a
/// channel afterwards.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ChannelSet {
    names: BTreeSet<String>,
}

impl ChannelSet {
    /// Build a channel set, rejecting empty and duplicated names.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(empty_channel_name());
            }
            if !set.insert(name.clone()) {
                return Err(CoreError::warn()
                    .domain(Domain::Model)
                    .kind(ErrorKind::InvalidArgument)
                    .msgf(format_args!("channel `{name}` declared twice"))
                    .build());
            }
        }
        Ok(Self { names: set })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub(crate) fn empty_channel_name() -> CoreError {
    CoreError::warn()
        .domain(Domain::Values)
        .kind(ErrorKind::InvalidArgument)
        .msg("channel name must not be empty")
        .build()
}
