use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use datagen_console::channels::{model_for, parse_assignments, LogWriter};
use datagen_console::config::Config;
use datagen_core::config::GeneratorConfig;
use datagen_runtime::error::log_core_error;
use datagen_runtime::generator::{BroadcastHost, DataGenerator, LifecycleEvent};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_args();
    let model = model_for(&config).context("build generator model")?;

    let generator_config = GeneratorConfig::default()
        .with_period(config.period)
        .with_event_capacity(config.event_capacity)
        .with_thread_name(format!("{}-worker", config.name));

    let host = BroadcastHost::from_config(&generator_config);
    let abort = host.abort_request();
    let mut events = host.subscribe();
    let mut generator = DataGenerator::new(&config.name, model, generator_config, LogWriter, host)
        .context("create generator")?;
    if let Some(values) = parse_assignments(&config.values.join(","))? {
        generator = generator
            .with_values(values)
            .context("install initial values")?;
    }

    info!(
        "console started name={} period={:?} tick={:?} channels={:?}",
        config.name,
        config.period,
        config.tick,
        generator.known_channels().iter().collect::<Vec<_>>()
    );

    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(LifecycleEvent::WorkerTerminated(outcome)) => {
                    warn!("lifecycle event worker_terminated outcome={outcome:?}");
                }
                Ok(event) => info!("lifecycle event {}", event.label()),
                Err(RecvError::Lagged(skipped)) => warn!("dropped {skipped} lifecycle events"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    generator.start().context("start generator")?;

    let mut ticker = tokio::time::interval(config.tick);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                generator.on_tick();
                if abort.is_requested() {
                    warn!("generator aborted, exiting");
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match parse_assignments(&line) {
                    Ok(Some(values)) => {
                        if let Err(err) = generator.replace(values) {
                            log_core_error(err);
                        }
                    }
                    Ok(None) => {}
                    Err(err) => warn!("ignoring input: {err:#}"),
                },
                Ok(None) => {
                    info!("stdin closed, values are now fixed");
                    stdin_open = false;
                }
                Err(err) => {
                    warn!("stdin read failed: {err}");
                    stdin_open = false;
                }
            },
            res = &mut ctrl_c => {
                res.context("listen for ctrl-c")?;
                info!("ctrl-c received, stopping");
                break;
            }
        }
    }

    if generator.state().has_worker() {
        tokio::task::block_in_place(|| generator.request_stop()).context("stop generator")?;
    }
    info!("console finished in state {}", generator.state().label());

    Ok(())
}
