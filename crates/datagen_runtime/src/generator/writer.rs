use crate::error::WriteFault;

/// Minimal channel write capability.
///
/// This is intentionally tiny so we can:
/// - unit test the worker loop without a host
/// - adapt host output ports in the integration layer
///
/// A writer handed to a worker thread is moved there and only ever called
/// from that thread, so spawning needs `Send + 'static` but not `Sync`.
pub trait ChannelWriter<V> {
    fn write(&mut self, channel: &str, value: &V) -> Result<(), WriteFault>;
}

impl<V, F> ChannelWriter<V> for F
where
    F: FnMut(&str, &V) -> Result<(), WriteFault>,
{
    fn write(&mut self, channel: &str, value: &V) -> Result<(), WriteFault> {
        self(channel, value)
    }
}
