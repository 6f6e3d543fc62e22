use std::sync::Arc;

use anyhow::{bail, Context, Result};
use datagen_core::model::{DataService, GeneratorModel};
use datagen_core::values::ValueSet;
use datagen_runtime::error::WriteFault;
use datagen_runtime::generator::ChannelWriter;
use tracing::info;

use crate::config::Config;

/// Channel writer that logs each write instead of publishing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

impl ChannelWriter<f64> for LogWriter {
    fn write(&mut self, channel: &str, value: &f64) -> std::result::Result<(), WriteFault> {
        info!(target: "datagen::channel", channel, value, "write");
        Ok(())
    }
}

/// Model for the configured channels, all typed `/double`.
pub fn model_for(config: &Config) -> Result<Arc<GeneratorModel>> {
    let model = if config.channels.is_empty() {
        GeneratorModel::for_type("/double")?
    } else {
        let service = config
            .channels
            .iter()
            .fold(DataService::new(format!("{}Srv", config.name)), |srv, channel| {
                srv.output_port(channel.as_str(), "/double")
            });
        GeneratorModel::for_data_service(&service)?
    };
    Ok(Arc::new(model))
}

/// Parse a single `channel=value` assignment.
pub fn parse_assignment(text: &str) -> Result<(String, f64)> {
    let Some((channel, value)) = text.split_once('=') else {
        bail!("expected `channel=value`, got `{text}`");
    };
    let channel = channel.trim();
    if channel.is_empty() {
        bail!("missing channel name in `{text}`");
    }
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid value for channel `{channel}`"))?;
    Ok((channel.to_string(), value))
}

/// Parse a line of assignments separated by commas or whitespace.
///
/// A blank line yields `None`. The result replaces the whole value set.
pub fn parse_assignments(line: &str) -> Result<Option<ValueSet<f64>>> {
    let assignments = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_assignment)
        .collect::<Result<Vec<_>>>()?;

    if assignments.is_empty() {
        return Ok(None);
    }
    Ok(Some(ValueSet::new(assignments)?))
}
