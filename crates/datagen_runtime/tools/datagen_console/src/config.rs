use std::env;
use std::time::Duration;

use datagen_core::config::{DEFAULT_EVENT_CAPACITY, DEFAULT_PERIOD};

pub const DEFAULT_NAME: &str = "datagen_console";
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

pub struct Config {
    pub name: String,
    pub period: Duration,
    pub tick: Duration,
    /// Lifecycle event channel capacity.
    pub event_capacity: usize,
    /// Output channels; empty means a single `out` channel.
    pub channels: Vec<String>,
    /// Initial `channel=value` assignments.
    pub values: Vec<String>,
}

impl Config {
    pub fn from_args() -> Self {
        Self::from_args_iter(env::args())
    }

    pub fn from_args_iter<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name = DEFAULT_NAME.to_string();
        let mut period = env::var("DATAGEN_PERIOD_MS")
            .ok()
            .and_then(|value| parse_millis(&value))
            .unwrap_or(DEFAULT_PERIOD);
        let mut tick = env::var("DATAGEN_TICK_MS")
            .ok()
            .and_then(|value| parse_millis(&value))
            .filter(|tick| !tick.is_zero())
            .unwrap_or(DEFAULT_TICK);
        let mut event_capacity = env::var("DATAGEN_EVENT_CAPACITY")
            .ok()
            .and_then(|value| parse_capacity(&value))
            .unwrap_or(DEFAULT_EVENT_CAPACITY);
        let mut channels = env::var("DATAGEN_CHANNELS")
            .map(|value| parse_list(&value))
            .unwrap_or_default();
        let mut values = Vec::new();

        let mut args = iter.into_iter();
        let _ = args.next();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                "--name" => {
                    if let Some(value) = args.next() {
                        name = value.as_ref().to_string();
                    }
                }
                "--period-ms" => {
                    if let Some(value) = args.next().and_then(|v| parse_millis(v.as_ref())) {
                        period = value;
                    }
                }
                "--tick-ms" => {
                    if let Some(value) = args
                        .next()
                        .and_then(|v| parse_millis(v.as_ref()))
                        .filter(|tick| !tick.is_zero())
                    {
                        tick = value;
                    }
                }
                "--event-capacity" => {
                    if let Some(value) = args.next().and_then(|v| parse_capacity(v.as_ref())) {
                        event_capacity = value;
                    }
                }
                "--channels" => {
                    if let Some(value) = args.next() {
                        channels = parse_list(value.as_ref());
                    }
                }
                "--value" => {
                    if let Some(value) = args.next() {
                        values.push(value.as_ref().to_string());
                    }
                }
                _ if arg.starts_with("--name=") => {
                    name = arg["--name=".len()..].to_string();
                }
                _ if arg.starts_with("--period-ms=") => {
                    if let Some(value) = parse_millis(&arg["--period-ms=".len()..]) {
                        period = value;
                    }
                }
                _ if arg.starts_with("--tick-ms=") => {
                    if let Some(value) =
                        parse_millis(&arg["--tick-ms=".len()..]).filter(|tick| !tick.is_zero())
                    {
                        tick = value;
                    }
                }
                _ if arg.starts_with("--event-capacity=") => {
                    if let Some(value) = parse_capacity(&arg["--event-capacity=".len()..]) {
                        event_capacity = value;
                    }
                }
                _ if arg.starts_with("--channels=") => {
                    channels = parse_list(&arg["--channels=".len()..]);
                }
                _ if arg.starts_with("--value=") => {
                    values.push(arg["--value=".len()..].to_string());
                }
                _ => {}
            }
        }

        Self {
            name,
            period,
            tick,
            event_capacity,
            channels,
            values,
        }
    }
}

fn print_usage() {
    println!(
        "datagen_console [--name <name>] [--period-ms <ms>] [--tick-ms <ms>] [--event-capacity <n>] [--channels a,b] [--value a=1.0]..."
    );
}

fn parse_millis(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_millis)
}

fn parse_capacity(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|capacity| *capacity > 0)
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
