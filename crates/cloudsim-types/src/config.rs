//! Session configuration, loaded from an optional TOML file.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimError};

/// Maximum number of echo replies `ping` will simulate.
pub const MAX_PING_COUNT: u32 = 20;

/// Tunables for a simulated terminal session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// User name shown in key comments and connection banners.
    pub user: String,
    /// Simulated local host name.
    pub hostname: String,
    /// Prompt path reported by `pwd`.
    pub home: String,
    /// Fixed RNG seed for reproducible identifiers. Entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Number of subsequent commands a `git clone` stays in the cloning state.
    pub clone_delay: u32,
    /// Echo replies printed by `ping`.
    pub ping_count: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            hostname: "cloudsim".to_string(),
            home: "~".to_string(),
            seed: None,
            clone_delay: 0,
            ping_count: 4,
        }
    }
}

impl SimConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)
            .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check field ranges. `load` and `from_toml` call this; configs built
    /// in code are checked when a session starts.
    pub fn validate(&self) -> Result<()> {
        if self.user.trim().is_empty() {
            return Err(SimError::Config("user must not be empty".to_string()));
        }
        if self.hostname.trim().is_empty() {
            return Err(SimError::Config("hostname must not be empty".to_string()));
        }
        if self.home.trim().is_empty() {
            return Err(SimError::Config("home must not be empty".to_string()));
        }
        if self.ping_count == 0 || self.ping_count > MAX_PING_COUNT {
            return Err(SimError::Config(format!(
                "ping_count must be between 1 and {MAX_PING_COUNT}"
            )));
        }
        Ok(())
    }
}
