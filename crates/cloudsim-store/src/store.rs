//! The resource store: one collection per resource kind.

use std::fmt;

use crate::collection::Collection;
use crate::git_repo::GitRepo;
use crate::instance::{Instance, InstanceType};
use crate::ssh_key::SshKey;

/// All simulated resources of a session.
///
/// The three collections are independent; nothing in one refers to another.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    pub instances: Collection<Instance>,
    pub keys: Collection<SshKey>,
    pub repos: Collection<GitRepo>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances of the given type.
    pub fn count_of(&self, instance_type: InstanceType) -> usize {
        self.instances
            .iter()
            .filter(|i| i.instance_type() == instance_type)
            .count()
    }

    /// Per-type instance counts plus the SSH key count.
    pub fn summary(&self) -> Summary {
        Summary {
            by_type: InstanceType::ALL.map(|t| (t, self.count_of(t))),
            ssh_keys: self.keys.len(),
        }
    }
}

/// Resource counts, as shown in a status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub by_type: [(InstanceType, usize); 5],
    pub ssh_keys: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (t, count) in &self.by_type {
            write!(f, "{}: {count}  ", t.short_label())?;
        }
        write!(f, "SSH: {}", self.ssh_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Named;

    fn instance(name: &str, t: InstanceType) -> Instance {
        Instance::new(format!("i-{name}"), name.to_string(), t, "00:00:00".into())
    }

    #[test]
    fn empty_summary() {
        let store = ResourceStore::new();
        assert_eq!(
            store.summary().to_string(),
            "Compute: 0  DB: 0  Storage: 0  Net: 0  Sec: 0  SSH: 0"
        );
    }

    #[test]
    fn summary_counts_by_type() {
        let mut store = ResourceStore::new();
        store
            .instances
            .add(instance("a", InstanceType::Compute))
            .unwrap();
        store
            .instances
            .add(instance("b", InstanceType::Compute))
            .unwrap();
        store
            .instances
            .add(instance("c", InstanceType::Security))
            .unwrap();
        store
            .keys
            .add(SshKey::new("k".into(), "pk".into(), "t".into()))
            .unwrap();
        let summary = store.summary();
        assert_eq!(summary.by_type[0], (InstanceType::Compute, 2));
        assert_eq!(summary.by_type[4], (InstanceType::Security, 1));
        assert_eq!(summary.ssh_keys, 1);
        assert!(summary.to_string().starts_with("Compute: 2  DB: 0"));
    }

    #[test]
    fn collections_are_independent() {
        let mut store = ResourceStore::new();
        store
            .instances
            .add(instance("shared", InstanceType::Storage))
            .unwrap();
        store
            .keys
            .add(SshKey::new("shared".into(), "pk".into(), "t".into()))
            .unwrap();
        store
            .repos
            .add(GitRepo::cloning("shared".into(), "https://h/shared".into()))
            .unwrap();
        assert_eq!(store.instances.get("shared").unwrap().name(), "shared");
        assert_eq!(store.keys.len(), 1);
        assert_eq!(store.repos.len(), 1);
    }
}
