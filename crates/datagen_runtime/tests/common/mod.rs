#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use datagen_runtime::error::WriteFault;
use datagen_runtime::generator::{ChannelWriter, GeneratorHost, LifecycleEvent};

/// Writer that records every write.
#[derive(Clone, Default)]
pub struct RecordingWriter {
    pub written: Arc<Mutex<Vec<(String, f64)>>>,
}

impl RecordingWriter {
    pub fn writes(&self) -> Vec<(String, f64)> {
        self.written.lock().expect("writes lock").clone()
    }
}

impl ChannelWriter<f64> for RecordingWriter {
    fn write(&mut self, channel: &str, value: &f64) -> Result<(), WriteFault> {
        self.written
            .lock()
            .expect("writes lock")
            .push((channel.to_string(), *value));
        Ok(())
    }
}

/// Writer that succeeds until its `fail_on`-th call (1-based), then fails or panics.
pub struct FailingWriter {
    pub fail_on: usize,
    pub panic: bool,
    pub calls: Arc<AtomicUsize>,
}

impl FailingWriter {
    pub fn failing_on(fail_on: usize) -> Self {
        Self {
            fail_on,
            panic: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn panicking_on(fail_on: usize) -> Self {
        Self {
            panic: true,
            ..Self::failing_on(fail_on)
        }
    }
}

impl ChannelWriter<f64> for FailingWriter {
    fn write(&mut self, channel: &str, _value: &f64) -> Result<(), WriteFault> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call < self.fail_on {
            return Ok(());
        }
        if self.panic {
            panic!("writer exploded on {channel}");
        }
        Err(WriteFault::new(format!("{channel} is disconnected")))
    }
}

/// Writer that reports its first call, blocks until released, then fails.
pub struct GatedWriter {
    entered: Sender<()>,
    release: Receiver<()>,
}

impl GatedWriter {
    pub fn new(entered: Sender<()>, release: Receiver<()>) -> Self {
        Self { entered, release }
    }
}

impl ChannelWriter<f64> for GatedWriter {
    fn write(&mut self, channel: &str, _value: &f64) -> Result<(), WriteFault> {
        let _ = self.entered.send(());
        let _ = self.release.recv();
        Err(WriteFault::new(format!("{channel} went away")))
    }
}

/// Host that keeps every event and counts abort requests.
#[derive(Clone, Default)]
pub struct RecordingHost {
    pub events: Arc<Mutex<Vec<LifecycleEvent>>>,
    pub aborts: Arc<AtomicUsize>,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().expect("events lock").clone()
    }

    pub fn aborts(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }
}

impl GeneratorHost for RecordingHost {
    fn emit(&mut self, event: LifecycleEvent) {
        self.events.lock().expect("events lock").push(event);
    }

    fn request_abort(&mut self) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Poll `cond` every millisecond until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if cond() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
}
