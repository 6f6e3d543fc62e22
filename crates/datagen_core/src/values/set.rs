use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::error::{CoreError, Result};

use super::channels::{empty_channel_name, ChannelSet};

/// Immutable snapshot mapping channel name to the value written on it.
///
/// There is no way to mutate a `ValueSet` after construction; changing what
/// a generator publishes means building a new set and replacing it whole.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValueSet<V> {
    entries: BTreeMap<String, V>,
}

impl<V> ValueSet<V> {
    /// Build a value set from `(channel, value)` pairs.
    ///
    /// Empty channel names are rejected. A channel listed twice keeps its
    /// last value.
    pub fn new<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, value) in entries {
            let name = name.into();
            if name.is_empty() {
                return Err(empty_channel_name());
            }
            map.insert(name, value);
        }
        Ok(Self { entries: map })
    }

    /// Fail with `UnknownChannel` on the first key `channels` does not contain.
    pub fn validate_against(&self, channels: &ChannelSet) -> Result<()> {
        match self.entries.keys().find(|name| !channels.contains(name)) {
            Some(unknown) => Err(CoreError::unknown_channel(unknown.as_str())),
            None => Ok(()),
        }
    }

    pub fn get(&self, channel: &str) -> Option<&V> {
        self.entries.get(channel)
    }

    pub fn channels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in channel-name order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iterator over `(channel, value)` pairs of a [`ValueSet`].
pub struct Iter<'a, V> {
    inner: btree_map::Iter<'a, String, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (name.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V> IntoIterator for &'a ValueSet<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn last_duplicate_wins() {
        let set = ValueSet::new([("out", 1), ("out", 2)]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("out"), Some(&2));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = ValueSet::new([("", 1.0)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn validation_names_the_first_unknown_channel() {
        let channels = ChannelSet::new(["out"]).unwrap();
        let set = ValueSet::new([("out", 1), ("zeta", 2), ("alpha", 3)]).unwrap();

        let err = set.validate_against(&channels).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownChannel);
        assert_eq!(err.channel(), Some("alpha"));
    }
}
