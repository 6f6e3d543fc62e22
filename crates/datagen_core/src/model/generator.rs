use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{CoreError, Domain, ErrorKind, Result};
use crate::values::ChannelSet;

use super::{DataService, PortSpec};

/// Channel name used by generators built from a bare data type.
pub const DEFAULT_CHANNEL: &str = "out";

/// Port layout of a generator component.
///
/// Output ports are the channels the worker writes to. Input ports are kept
/// so a generator can stand in for a service that declares them, but values
/// can never target them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GeneratorModel {
    name: String,
    provides: Option<String>,
    ports: Vec<PortSpec>,
    channels: Arc<ChannelSet>,
}

impl GeneratorModel {
    /// Generator with a single `out` channel of `type_name`.
    ///
    /// Every call builds a new model.
    pub fn for_type(type_name: impl Into<String>) -> Result<Self> {
        let type_name = type_name.into();
        if type_name.is_empty() {
            return Err(CoreError::warn()
                .domain(Domain::Model)
                .kind(ErrorKind::InvalidArgument)
                .msg("type name must not be empty")
                .build());
        }
        Self::from_ports(
            format!("Generator[{type_name}]"),
            None,
            vec![PortSpec::output(DEFAULT_CHANNEL, type_name)],
        )
    }

    /// Generator exposing the same ports as `service`.
    pub fn for_data_service(service: &DataService) -> Result<Self> {
        Self::from_ports(
            format!("{}::Generator", service.name()),
            Some(service.name().to_string()),
            service.ports().to_vec(),
        )
    }

    fn from_ports(name: String, provides: Option<String>, ports: Vec<PortSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for port in &ports {
            if !seen.insert(port.name.as_str()) {
                return Err(CoreError::warn()
                    .domain(Domain::Model)
                    .kind(ErrorKind::InvalidArgument)
                    .msgf(format_args!("port `{}` declared twice in {name}", port.name))
                    .build());
            }
        }

        let channels = ChannelSet::new(
            ports
                .iter()
                .filter(|port| port.is_output())
                .map(|port| port.name.clone()),
        )?;
        if channels.is_empty() {
            return Err(CoreError::warn()
                .domain(Domain::Model)
                .kind(ErrorKind::InvalidArgument)
                .msgf(format_args!("{name} has no output port to generate on"))
                .build());
        }

        Ok(Self {
            name,
            provides,
            ports,
            channels: Arc::new(channels),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the data service this model was derived from, if any.
    pub fn provides(&self) -> Option<&str> {
        self.provides.as_deref()
    }

    pub fn ports(&self) -> &[PortSpec] {
        &self.ports
    }

    pub fn port(&self, name: &str) -> Option<&PortSpec> {
        self.ports.iter().find(|port| port.name == name)
    }

    /// Channels accepted as keys of a value set.
    pub fn known_channels(&self) -> &Arc<ChannelSet> {
        &self.channels
    }
}

/// Cache of generator models derived from data services.
///
/// Deriving twice from the same service yields the same shared model, so
/// the model can be referenced by identity. The cache is an explicit value
/// owned by the host integration; `reset` drops everything it holds.
#[derive(Debug, Default)]
pub struct GeneratorModels {
    by_service: HashMap<String, Arc<GeneratorModel>>,
}

impl GeneratorModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut dispatching to `for_type` or `for_data_service`.
    pub fn model_for(&mut self, source: ModelSource<'_>) -> Result<Arc<GeneratorModel>> {
        match source {
            ModelSource::Type(type_name) => self.for_type(type_name),
            ModelSource::Service(service) => self.for_data_service(service),
        }
    }

    /// Never cached: each call returns a distinct model.
    pub fn for_type(&self, type_name: &str) -> Result<Arc<GeneratorModel>> {
        GeneratorModel::for_type(type_name).map(Arc::new)
    }

    pub fn for_data_service(&mut self, service: &DataService) -> Result<Arc<GeneratorModel>> {
        if let Some(model) = self.by_service.get(service.name()) {
            return Ok(Arc::clone(model));
        }
        let model = Arc::new(GeneratorModel::for_data_service(service)?);
        self.by_service
            .insert(service.name().to_string(), Arc::clone(&model));
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.by_service.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_service.is_empty()
    }

    pub fn reset(&mut self) {
        self.by_service.clear();
    }
}

/// What a generator model is derived from.
#[derive(Debug, Copy, Clone)]
pub enum ModelSource<'a> {
    Type(&'a str),
    Service(&'a DataService),
}
