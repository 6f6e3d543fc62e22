use super::PortSpec;

/// Data-service contract a generator can be derived from.
///
/// Only the port list matters here; everything else about the service
/// (provided models, device bindings) belongs to the host framework.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DataService {
    name: String,
    ports: Vec<PortSpec>,
}

impl DataService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: Vec::new(),
        }
    }

    pub fn output_port(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.ports.push(PortSpec::output(name, type_name));
        self
    }

    pub fn input_port(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.ports.push(PortSpec::input(name, type_name));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ports(&self) -> &[PortSpec] {
        &self.ports
    }
}
