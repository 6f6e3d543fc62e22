/// Direction of a declared port.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

/// A named, typed port of a data service or generator model.
///
/// `type_name` is opaque to this crate (e.g. `/double`, `/base/samples/RigidBodyState`).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PortSpec {
    pub name: String,
    pub type_name: String,
    pub direction: PortDirection,
}

impl PortSpec {
    pub fn output(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            direction: PortDirection::Output,
        }
    }

    pub fn input(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            direction: PortDirection::Input,
        }
    }

    pub fn is_output(&self) -> bool {
        self.direction == PortDirection::Output
    }
}
