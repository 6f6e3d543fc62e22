use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use datagen_core::error::Result;
use datagen_core::lifecycle::ExitSignal;
use datagen_core::values::ValueSource;
use tracing::{debug, warn};

use super::{ChannelWriter, PeriodWait};
use crate::error::WorkerFault;

/// How a worker thread ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// The loop returned after observing the exit signal.
    Completed,
    /// The loop was cut short by a write failure or a panic.
    Faulted(WorkerFault),
}

impl WorkerOutcome {
    pub fn fault(&self) -> Option<&WorkerFault> {
        match self {
            WorkerOutcome::Completed => None,
            WorkerOutcome::Faulted(fault) => Some(fault),
        }
    }
}

/// The periodic write loop.
///
/// Each iteration writes every entry of the current value set (if any) and
/// then waits for `period` or the exit signal. A failed write ends the loop
/// immediately; it is never retried here.
pub fn run_loop<V, S, W, P>(
    source: &S,
    period: Duration,
    exit: &ExitSignal,
    wait: &P,
    writer: &mut W,
) -> std::result::Result<(), WorkerFault>
where
    S: ValueSource<V> + ?Sized,
    W: ChannelWriter<V>,
    P: PeriodWait + ?Sized,
{
    loop {
        if let Some(values) = source.current() {
            for (channel, value) in values.iter() {
                writer
                    .write(channel, value)
                    .map_err(|cause| WorkerFault::Write {
                        channel: channel.to_string(),
                        source: cause,
                    })?;
            }
        }

        if wait.wait(period, exit) {
            return Ok(());
        }
    }
}

/// A running worker thread plus its exit latch.
///
/// The exit latch is set by `signal_exit` (or on drop); the thread is joined
/// at most once, by `join`.
#[derive(Debug)]
pub struct WorkerHandle {
    exit: Arc<ExitSignal>,
    thread: Option<JoinHandle<WorkerOutcome>>,
}

impl WorkerHandle {
    /// Spawn a named thread running [`run_loop`].
    ///
    /// Panics raised by the loop body (including by `writer`) are caught on
    /// the worker thread and reported as [`WorkerFault::Panic`].
    pub fn spawn<V, S, W, P>(
        name: &str,
        period: Duration,
        source: Arc<S>,
        wait: Arc<P>,
        mut writer: W,
    ) -> Result<Self>
    where
        V: Send + Sync + 'static,
        S: ValueSource<V> + ?Sized,
        W: ChannelWriter<V> + Send + 'static,
        P: PeriodWait + ?Sized,
    {
        let exit = Arc::new(ExitSignal::new());
        let thread_exit = Arc::clone(&exit);

        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                debug!(?period, "worker started");
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    run_loop::<V, S, W, P>(&*source, period, &thread_exit, &*wait, &mut writer)
                }));

                let outcome = match result {
                    Ok(Ok(())) => WorkerOutcome::Completed,
                    Ok(Err(fault)) => WorkerOutcome::Faulted(fault),
                    Err(payload) => WorkerOutcome::Faulted(WorkerFault::Panic {
                        message: panic_message(payload.as_ref()),
                    }),
                };
                match &outcome {
                    WorkerOutcome::Completed => debug!("worker exited"),
                    WorkerOutcome::Faulted(fault) => {
                        warn!(fault = fault.as_label(), "worker terminated: {fault}")
                    }
                }
                outcome
            })?;

        Ok(Self {
            exit,
            thread: Some(thread),
        })
    }

    /// Ask the loop to return at its next wait. Returns `true` on the first call.
    pub fn signal_exit(&self) -> bool {
        self.exit.set()
    }

    /// Non-blocking liveness check. A joined worker counts as finished.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the thread ends and take its outcome.
    ///
    /// Returns `None` if the outcome was already taken.
    pub fn join(&mut self) -> Option<WorkerOutcome> {
        let thread = self.thread.take()?;
        Some(thread.join().unwrap_or_else(|payload| {
            WorkerOutcome::Faulted(WorkerFault::Panic {
                message: panic_message(payload.as_ref()),
            })
        }))
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        // Never join here: a writer stuck in a host call would hang the owner.
        self.exit.set();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
