// Copyright © 2024 Pathway

use std::fmt;

use arcstr::ArcStr;

use super::model::ALL;

/// Which machines a tailored report keeps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MachineSelector {
    /// Fold every machine into one synthetic `ALL` machine.
    #[default]
    All,
    Machine(ArcStr),
}

impl MachineSelector {
    /// Absent, empty and `ALL` all mean "no restriction".
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None | Some("" | ALL) => Self::All,
            Some(id) => Self::Machine(ArcStr::from(id)),
        }
    }

    pub fn machine_id(&self) -> Option<&ArcStr> {
        match self {
            Self::All => None,
            Self::Machine(id) => Some(id),
        }
    }
}

impl fmt::Display for MachineSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL}"),
            Self::Machine(id) => write!(f, "{id}"),
        }
    }
}

/// The slice of a report a name-graph request asks for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameGraphQuery {
    pub type_id: Option<ArcStr>,
    pub name_id: Option<ArcStr>,
    pub machine: MachineSelector,
}

impl NameGraphQuery {
    pub fn new(
        type_id: Option<impl Into<ArcStr>>,
        name_id: Option<impl Into<ArcStr>>,
        machine: MachineSelector,
    ) -> Self {
        Self {
            type_id: type_id.map(Into::into),
            name_id: name_id.map(Into::into),
            machine,
        }
    }

    /// Query for `type_id`/`name_id` across all machines.
    pub fn for_name(type_id: impl Into<ArcStr>, name_id: impl Into<ArcStr>) -> Self {
        Self {
            type_id: Some(type_id.into()),
            name_id: Some(name_id.into()),
            machine: MachineSelector::All,
        }
    }

    #[must_use]
    pub fn on_machine(mut self, machine: MachineSelector) -> Self {
        self.machine = machine;
        self
    }

    pub fn type_id(&self) -> Option<&str> {
        self.type_id.as_deref()
    }

    pub fn name_id(&self) -> Option<&str> {
        self.name_id.as_deref()
    }
}

impl fmt::Display for NameGraphQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "type={} name={} ip={}",
            self.type_id().unwrap_or("-"),
            self.name_id().unwrap_or("-"),
            self.machine
        )
    }
}
