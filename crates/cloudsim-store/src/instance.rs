//! Simulated cloud instances.

use std::fmt;
use std::str::FromStr;

use cloudsim_types::error::{Result, SimError};

use crate::collection::Named;

/// The five fixed instance types. Parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceType {
    Compute,
    Database,
    Storage,
    Network,
    Security,
}

impl InstanceType {
    /// All types, in display order.
    pub const ALL: [InstanceType; 5] = [
        InstanceType::Compute,
        InstanceType::Database,
        InstanceType::Storage,
        InstanceType::Network,
        InstanceType::Security,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Network => "network",
            Self::Security => "security",
        }
    }

    /// Short label used by the status summary.
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Database => "DB",
            Self::Storage => "Storage",
            Self::Network => "Net",
            Self::Security => "Sec",
        }
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                SimError::InvalidArgument(format!(
                    "invalid type '{s}' (expected one of: {})",
                    valid.join(", ")
                ))
            })
    }
}

/// Power state of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceStatus {
    Running,
    Stopped,
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
        })
    }
}

/// A simulated cloud instance. `id` and `instance_type` never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    id: String,
    name: String,
    instance_type: InstanceType,
    status: InstanceStatus,
    created: String,
}

impl Instance {
    /// A freshly created instance, already running.
    pub fn new(id: String, name: String, instance_type: InstanceType, created: String) -> Self {
        Self {
            id,
            name,
            instance_type,
            status: InstanceStatus::Running,
            created,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn instance_type(&self) -> InstanceType {
        self.instance_type
    }

    pub fn status(&self) -> InstanceStatus {
        self.status
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    /// Transition stopped -> running.
    pub fn start(&mut self) -> Result<()> {
        self.transition(InstanceStatus::Running)
    }

    /// Transition running -> stopped.
    pub fn stop(&mut self) -> Result<()> {
        self.transition(InstanceStatus::Stopped)
    }

    fn transition(&mut self, to: InstanceStatus) -> Result<()> {
        if self.status == to {
            return Err(SimError::InvalidStateTransition(format!(
                "instance '{}' is already {to}",
                self.name
            )));
        }
        log::info!("instance {} ({}): {} -> {to}", self.name, self.id, self.status);
        self.status = to;
        Ok(())
    }
}

impl Named for Instance {
    const KIND: &'static str = "instance";

    fn name(&self) -> &str {
        &self.name
    }
}
