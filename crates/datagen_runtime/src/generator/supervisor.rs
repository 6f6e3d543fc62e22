use std::sync::Arc;

use datagen_core::config::{GeneratorConfig, GeneratorKind};
use datagen_core::error::{CoreError, Domain, ErrorKind, Result};
use datagen_core::lifecycle::{available_transitions, next_state, State, Transition};
use datagen_core::model::GeneratorModel;
use datagen_core::values::{ChannelSet, ValueSet, ValueStore};
use tracing::{debug, info, warn};

use super::{
    ChannelWriter, GeneratorHost, LifecycleEvent, PeriodWait, SystemWait, WorkerHandle,
    WorkerOutcome,
};
use crate::error::log_core_error;

/// A component that writes its current values on every output channel at a
/// fixed period.
///
/// Responsibilities:
/// - Hold the lifecycle state and the shared value store
/// - Own the worker thread from `start` until it is joined
/// - Turn an unrequested worker termination into a `WorkerTerminated` event
///   and an abort request, exactly once
///
/// All lifecycle operations run on the owning (host) thread. `replace` may
/// also be called from other threads through [`DataGenerator::values`].
pub struct DataGenerator<V, W, H, P = SystemWait> {
    name: String,
    model: Arc<GeneratorModel>,
    config: GeneratorConfig,
    state: State,
    store: Arc<ValueStore<V>>,

    // Moved into the worker thread on start.
    writer: Option<W>,
    wait: Arc<P>,
    host: H,

    // Some from start until the thread has been joined.
    worker: Option<WorkerHandle>,
}

impl<V, W, H> DataGenerator<V, W, H, SystemWait>
where
    V: Send + Sync + 'static,
    W: ChannelWriter<V> + Send + 'static,
    H: GeneratorHost,
{
    /// Create an idle generator for `model` that waits on the wall clock.
    ///
    /// The channel set is taken from the model and cannot change afterwards.
    pub fn new(
        name: impl Into<String>,
        model: Arc<GeneratorModel>,
        config: GeneratorConfig,
        writer: W,
        host: H,
    ) -> Result<Self> {
        Self::new_with_wait(name, model, config, writer, host, Arc::new(SystemWait))
    }
}

/// Public API (library user facing).
impl<V, W, H, P> DataGenerator<V, W, H, P>
where
    V: Send + Sync + 'static,
    W: ChannelWriter<V> + Send + 'static,
    H: GeneratorHost,
    P: PeriodWait,
{
    /// Create an idle generator whose worker waits between iterations with `wait`.
    pub fn new_with_wait(
        name: impl Into<String>,
        model: Arc<GeneratorModel>,
        config: GeneratorConfig,
        writer: W,
        host: H,
        wait: Arc<P>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::error()
                .domain(Domain::Lifecycle)
                .kind(ErrorKind::InvalidArgument)
                .msg("generator name must not be empty")
                .build());
        }
        config.validate()?;

        let store = Arc::new(ValueStore::new(Arc::clone(model.known_channels())));
        Ok(Self {
            name,
            model,
            config,
            state: State::Idle,
            store,
            writer: Some(writer),
            wait,
            host,
            worker: None,
        })
    }

    /// Install initial values; fails on an unknown channel.
    pub fn with_values(self, values: ValueSet<V>) -> Result<Self> {
        self.store.replace(values)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn model(&self) -> &Arc<GeneratorModel> {
        &self.model
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn known_channels(&self) -> &Arc<ChannelSet> {
        self.store.channels()
    }

    /// Transitions accepted from the current state.
    pub fn available_transitions(&self) -> &'static [Transition] {
        available_transitions(self.state)
    }

    /// Shared handle on the value store, for replacing values from other threads.
    pub fn values(&self) -> Arc<ValueStore<V>> {
        Arc::clone(&self.store)
    }

    /// Atomically replace the current values.
    ///
    /// Fails with `UnknownChannel` if a key is not a known channel, and with
    /// `InvalidState` for a started constant generator. The previous values
    /// stay in place on failure.
    pub fn replace(&self, values: ValueSet<V>) -> Result<()> {
        self.store.replace(values)?;
        debug!(generator = %self.name, "values replaced");
        Ok(())
    }

    pub fn current(&self) -> Option<Arc<ValueSet<V>>> {
        self.store.current()
    }

    /// Whether a worker thread exists and has not ended yet.
    pub fn is_worker_alive(&self) -> bool {
        self.worker.as_ref().map_or(false, |worker| !worker.is_finished())
    }

    /// Spawn the worker and enter `Running`.
    pub fn start(&mut self) -> Result<()> {
        let next = next_state(self.state, Transition::Start)?;
        let writer = self.writer.take().ok_or_else(|| {
            CoreError::error()
                .domain(Domain::Worker)
                .kind(ErrorKind::InvalidState)
                .msg("channel writer is no longer available")
                .build()
        })?;

        let worker = WorkerHandle::spawn::<V, ValueStore<V>, W, P>(
            &self.config.thread_name,
            self.config.period,
            Arc::clone(&self.store),
            Arc::clone(&self.wait),
            writer,
        )?;
        if self.config.kind == GeneratorKind::Constant {
            self.store.freeze();
        }

        self.worker = Some(worker);
        self.state = next;
        info!(generator = %self.name, period = ?self.config.period, "generator started");
        self.host.emit(LifecycleEvent::Started);
        Ok(())
    }

    /// Signal the worker to exit and enter `Stopping` without joining it.
    ///
    /// The stop completes on `request_stop` or on the next tick that finds
    /// the worker gone. Calling it again while stopping is a no-op.
    pub fn begin_stop(&mut self) -> Result<()> {
        let next = next_state(self.state, Transition::Stop)?;
        if self.state == State::Running {
            if let Some(worker) = &self.worker {
                worker.signal_exit();
            }
            info!(generator = %self.name, "generator stopping");
        }
        self.state = next;
        Ok(())
    }

    /// Stop the worker and wait for it.
    ///
    /// Any fault the worker ended with is dropped. Once this returns, no
    /// further channel writes happen.
    pub fn request_stop(&mut self) -> Result<()> {
        self.begin_stop()?;
        self.finish_stop()
    }

    /// Supervise the worker. Never blocks on a live worker.
    pub fn on_tick(&mut self) {
        let finished = match &self.worker {
            Some(worker) => worker.is_finished(),
            None => return,
        };
        if !finished {
            return;
        }

        match self.state {
            State::Running => self.surface_termination(),
            State::Stopping => {
                if let Err(err) = self.finish_stop() {
                    log_core_error(err);
                }
            }
            _ => {}
        }
    }
}

/// Internal lifecycle plumbing.
impl<V, W, H, P> DataGenerator<V, W, H, P>
where
    V: Send + Sync + 'static,
    W: ChannelWriter<V> + Send + 'static,
    H: GeneratorHost,
    P: PeriodWait,
{
    fn finish_stop(&mut self) -> Result<()> {
        let next = next_state(self.state, Transition::Joined)?;
        if let Some(mut worker) = self.worker.take() {
            if let Some(WorkerOutcome::Faulted(fault)) = worker.join() {
                debug!(
                    generator = %self.name,
                    fault = fault.as_label(),
                    "worker fault suppressed by requested stop: {fault}"
                );
            }
        }

        self.state = next;
        info!(generator = %self.name, "generator stopped");
        self.host.emit(LifecycleEvent::Stopped);
        Ok(())
    }

    fn surface_termination(&mut self) {
        let next = match next_state(self.state, Transition::WorkerLost) {
            Ok(next) => next,
            Err(err) => {
                log_core_error(err);
                return;
            }
        };
        let Some(mut worker) = self.worker.take() else {
            return;
        };
        let Some(outcome) = worker.join() else {
            return;
        };

        match outcome.fault() {
            Some(fault) => warn!(generator = %self.name, "worker terminated: {fault}"),
            None => warn!(generator = %self.name, "worker exited without a stop request"),
        }

        self.state = next;
        self.host.emit(LifecycleEvent::WorkerTerminated(outcome));
        self.host.request_abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{WorkerFault, WriteFault};
    use crate::generator::{BroadcastHost, StepWait};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Clone, Default)]
    struct Recorder {
        written: Arc<Mutex<Vec<(String, i32)>>>,
        fail: bool,
    }

    impl ChannelWriter<i32> for Recorder {
        fn write(&mut self, channel: &str, value: &i32) -> std::result::Result<(), WriteFault> {
            if self.fail {
                return Err(WriteFault::new("port disconnected"));
            }
            self.written.lock().unwrap().push((channel.to_string(), *value));
            Ok(())
        }
    }

    fn generator(
        writer: Recorder,
    ) -> (DataGenerator<i32, Recorder, BroadcastHost, StepWait>, Arc<StepWait>) {
        let model = Arc::new(GeneratorModel::for_type("/int32").unwrap());
        let wait = Arc::new(StepWait::new());
        let generator = DataGenerator::new_with_wait(
            "gen",
            model,
            GeneratorConfig::default(),
            writer,
            BroadcastHost::new(8),
            Arc::clone(&wait),
        )
        .unwrap();
        (generator, wait)
    }

    fn wait_finished<V, W, H, P>(generator: &DataGenerator<V, W, H, P>)
    where
        V: Send + Sync + 'static,
        W: ChannelWriter<V> + Send + 'static,
        H: GeneratorHost,
        P: PeriodWait,
    {
        let deadline = Instant::now() + Duration::from_secs(5);
        while generator.is_worker_alive() {
            assert!(Instant::now() < deadline, "worker did not finish");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let model = Arc::new(GeneratorModel::for_type("/int32").unwrap());
        let result = DataGenerator::new(
            "",
            model,
            GeneratorConfig::default(),
            Recorder::default(),
            BroadcastHost::new(1),
        );
        assert_eq!(result.err().unwrap().kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let model = Arc::new(GeneratorModel::for_type("/int32").unwrap());
        let result = DataGenerator::new(
            "gen",
            model,
            GeneratorConfig::default().with_period(Duration::ZERO),
            Recorder::default(),
            BroadcastHost::new(1),
        );
        assert_eq!(result.err().unwrap().domain, Domain::Config);
    }

    #[test]
    fn start_and_stop_emit_events_in_order() {
        let (mut generator, _wait) = generator(Recorder::default());
        let mut events = generator.host().subscribe();

        generator.start().unwrap();
        assert_eq!(generator.state(), State::Running);
        assert!(generator.is_worker_alive());

        generator.request_stop().unwrap();
        assert_eq!(generator.state(), State::Stopped);
        assert!(!generator.is_worker_alive());
        assert!(generator.available_transitions().is_empty());

        assert_eq!(events.try_recv().unwrap(), LifecycleEvent::Started);
        assert_eq!(events.try_recv().unwrap(), LifecycleEvent::Stopped);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn initial_values_are_written_on_the_first_iteration() {
        let writer = Recorder::default();
        let written = Arc::clone(&writer.written);
        let (generator, wait) = generator(writer);
        let mut generator = generator
            .with_values(ValueSet::new([("out", 5)]).unwrap())
            .unwrap();

        generator.start().unwrap();
        assert!(wait.wait_for_waits(1, Duration::from_secs(5)));
        generator.request_stop().unwrap();

        assert_eq!(*written.lock().unwrap(), [("out".to_string(), 5)]);
    }

    #[test]
    fn initial_values_with_unknown_channel_fail() {
        let (generator, _wait) = generator(Recorder::default());
        let err = generator
            .with_values(ValueSet::new([("bla", 5)]).unwrap())
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::UnknownChannel);
    }

    #[test]
    fn worker_fault_aborts_once() {
        let (generator, _wait) = generator(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let mut generator = generator
            .with_values(ValueSet::new([("out", 1)]).unwrap())
            .unwrap();
        let mut events = generator.host().subscribe();
        let abort = generator.host().abort_request();

        generator.start().unwrap();
        wait_finished(&generator);
        generator.on_tick();

        assert_eq!(generator.state(), State::Aborted);
        assert!(abort.is_requested());
        assert_eq!(events.try_recv().unwrap(), LifecycleEvent::Started);
        match events.try_recv().unwrap() {
            LifecycleEvent::WorkerTerminated(WorkerOutcome::Faulted(WorkerFault::Write {
                channel,
                ..
            })) => assert_eq!(channel, "out"),
            other => panic!("unexpected event {other:?}"),
        }

        generator.on_tick();
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn begin_stop_is_completed_by_the_next_tick() {
        let (mut generator, _wait) = generator(Recorder::default());
        let mut events = generator.host().subscribe();

        generator.start().unwrap();
        generator.begin_stop().unwrap();
        generator.begin_stop().unwrap();
        assert_eq!(generator.state(), State::Stopping);

        wait_finished(&generator);
        generator.on_tick();
        assert_eq!(generator.state(), State::Stopped);

        assert_eq!(events.try_recv().unwrap(), LifecycleEvent::Started);
        assert_eq!(events.try_recv().unwrap(), LifecycleEvent::Stopped);
        assert!(!generator.host().abort_request().is_requested());
    }

    #[test]
    fn rejected_calls_keep_a_running_generator_stoppable() {
        let (mut generator, _wait) = generator(Recorder::default());
        let mut events = generator.host().subscribe();
        generator.start().unwrap();

        assert_eq!(generator.start().unwrap_err().kind, ErrorKind::AlreadyStarted);
        assert!(generator
            .replace(ValueSet::new([("bla", 1)]).unwrap())
            .is_err());
        assert!(generator.is_worker_alive());

        generator.request_stop().unwrap();
        assert_eq!(generator.state(), State::Stopped);
        assert!(!generator.is_worker_alive());
        assert_eq!(events.try_recv().unwrap(), LifecycleEvent::Started);
        assert_eq!(events.try_recv().unwrap(), LifecycleEvent::Stopped);
    }

    #[test]
    fn wall_clock_generator_writes_until_stopped() {
        let writer = Recorder::default();
        let written = Arc::clone(&writer.written);
        let model = Arc::new(GeneratorModel::for_type("/int32").unwrap());
        let mut generator: DataGenerator<i32, Recorder, BroadcastHost, SystemWait> =
            DataGenerator::new(
                "clock",
                model,
                GeneratorConfig::default().with_period(Duration::from_millis(1)),
                writer,
                BroadcastHost::new(4),
            )
            .unwrap()
            .with_values(ValueSet::new([("out", 3)]).unwrap())
            .unwrap();

        generator.start().unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while written.lock().unwrap().len() < 2 {
            assert!(Instant::now() < deadline, "no periodic writes");
            std::thread::sleep(Duration::from_millis(1));
        }
        generator.request_stop().unwrap();
        assert_eq!(generator.state(), State::Stopped);
    }

    #[test]
    fn constant_generator_freezes_on_start() {
        let model = Arc::new(GeneratorModel::for_type("/int32").unwrap());
        let mut generator = DataGenerator::new(
            "const",
            model,
            GeneratorConfig::default().with_kind(GeneratorKind::Constant),
            Recorder::default(),
            BroadcastHost::new(4),
        )
        .unwrap();

        generator.replace(ValueSet::new([("out", 1)]).unwrap()).unwrap();
        generator.start().unwrap();

        let err = generator
            .replace(ValueSet::new([("out", 2)]).unwrap())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
        assert_eq!(generator.current().unwrap().get("out"), Some(&1));
        generator.request_stop().unwrap();
    }

    #[tokio::test]
    async fn subscribers_can_await_events() {
        let (mut generator, _wait) = generator(Recorder::default());
        let mut events = generator.host().subscribe();

        generator.start().unwrap();
        assert_eq!(events.recv().await.unwrap(), LifecycleEvent::Started);

        generator.request_stop().unwrap();
        assert_eq!(events.recv().await.unwrap(), LifecycleEvent::Stopped);
    }
}
