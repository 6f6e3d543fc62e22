use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

/// Single-writer, multi-reader exit latch for a worker thread.
///
/// Intended use:
/// - the controlling side calls `set()` once to request exit
/// - the worker waits on `wait_timeout()` between iterations and wakes as
///   soon as the latch is set, not at the next period boundary
///
/// Once set, the latch stays set.
#[derive(Debug, Default)]
pub struct ExitSignal {
    set: Mutex<bool>,
    changed: Condvar,
}

impl ExitSignal {
    pub const fn new() -> Self {
        Self {
            set: Mutex::new(false),
            changed: Condvar::new(),
        }
    }

    /// Set the latch and wake every waiter.
    ///
    /// Returns `true` for the call that actually set it.
    pub fn set(&self) -> bool {
        let mut set = self.set.lock().unwrap_or_else(PoisonError::into_inner);
        let first = !*set;
        *set = true;
        drop(set);
        self.changed.notify_all();
        first
    }

    pub fn is_set(&self) -> bool {
        *self.set.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for at most `timeout`, returning early once the latch is set.
    ///
    /// Returns whether the latch is set on return.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.set.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .changed
            .wait_timeout_while(guard, timeout, |set| !*set)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn exit_signal_test() {
        let signal = ExitSignal::new();

        assert!(!signal.is_set());
        assert!(!signal.wait_timeout(Duration::from_millis(1)));

        assert!(signal.set());
        assert!(signal.is_set());
        assert!(!signal.set());
        assert!(signal.wait_timeout(Duration::from_secs(10)));
    }

    #[test]
    fn set_wakes_a_long_wait() {
        let signal = Arc::new(ExitSignal::new());
        let waiter = Arc::clone(&signal);
        let started = Instant::now();

        let handle = std::thread::spawn(move || waiter.wait_timeout(Duration::from_secs(30)));
        std::thread::sleep(Duration::from_millis(20));
        signal.set();

        assert!(handle.join().unwrap());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
