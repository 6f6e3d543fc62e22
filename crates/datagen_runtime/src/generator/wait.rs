use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Duration;

use datagen_core::lifecycle::ExitSignal;

/// Wait between two worker iterations.
pub trait PeriodWait: Send + Sync + 'static {
    /// Wait up to `period`, waking early once `exit` is set.
    ///
    /// Returns `true` when the worker should exit.
    fn wait(&self, period: Duration, exit: &ExitSignal) -> bool;
}

/// Wall-clock wait on the exit latch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemWait;

impl PeriodWait for SystemWait {
    fn wait(&self, period: Duration, exit: &ExitSignal) -> bool {
        exit.wait_timeout(period)
    }
}

/// How often a blocked `StepWait` re-checks the exit latch.
const STEP_POLL: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
struct Steps {
    granted: u64,
    consumed: u64,
    entered: u64,
}

/// Deterministic wait that ignores the period.
///
/// Each worker wait blocks until the driver grants one more iteration with
/// `step()`, or until the exit latch is set. Useful for hosts that drive a
/// generator from simulated time, and for tests.
#[derive(Debug, Default)]
pub struct StepWait {
    steps: Mutex<Steps>,
    changed: Condvar,
}

impl StepWait {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let one blocked (or the next) wait return.
    pub fn step(&self) {
        self.steps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .granted += 1;
        self.changed.notify_all();
    }

    /// Block until the worker has entered at least `count` waits.
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub fn wait_for_waits(&self, count: u64, timeout: Duration) -> bool {
        let guard = self.steps.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .changed
            .wait_timeout_while(guard, timeout, |steps| steps.entered < count)
            .unwrap_or_else(PoisonError::into_inner);
        guard.entered >= count
    }
}

impl PeriodWait for StepWait {
    fn wait(&self, _period: Duration, exit: &ExitSignal) -> bool {
        let mut steps = self.steps.lock().unwrap_or_else(PoisonError::into_inner);
        steps.entered += 1;
        self.changed.notify_all();

        loop {
            if exit.is_set() {
                return true;
            }
            if steps.granted > steps.consumed {
                steps.consumed += 1;
                return false;
            }
            let (guard, _) = self
                .changed
                .wait_timeout(steps, STEP_POLL)
                .unwrap_or_else(PoisonError::into_inner);
            steps = guard;
        }
    }
}
