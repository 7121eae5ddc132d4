//! Simulated SSH keys.

use crate::collection::Named;
use crate::ids::fingerprint;

/// A generated SSH key. Immutable apart from the agent-loaded marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshKey {
    name: String,
    public_key: String,
    fingerprint: String,
    created: String,
    added: bool,
}

impl SshKey {
    /// Build a key; the fingerprint is derived from `public_key`.
    pub fn new(name: String, public_key: String, created: String) -> Self {
        let fingerprint = fingerprint(&public_key);
        Self {
            name,
            public_key,
            fingerprint,
            created,
            added: false,
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    /// Whether `ssh-add` has loaded this key into the simulated agent.
    pub fn is_added(&self) -> bool {
        self.added
    }

    /// Mark the key as loaded. Returns `false` if it already was.
    pub fn mark_added(&mut self) -> bool {
        !std::mem::replace(&mut self.added, true)
    }
}

impl Named for SshKey {
    const KIND: &'static str = "ssh key";

    fn name(&self) -> &str {
        &self.name
    }
}
