//! In-memory resource model.
//!
//! Three independent named collections (instances, SSH keys, Git
//! repositories) live inside a [`ResourceStore`]. Nothing here is persisted;
//! the store lives exactly as long as the session that owns it.

mod collection;
pub mod git_repo;
pub mod ids;
pub mod instance;
pub mod ssh_key;
mod store;

/// Insertion-ordered collection of uniquely named entities.
pub use collection::{Collection, Named};
/// A cloned (or cloning) Git repository.
pub use git_repo::{GitRepo, RepoStatus};
/// Synthetic identifier and key-material source.
pub use ids::{IdGenerator, fingerprint};
/// A simulated cloud instance.
pub use instance::{Instance, InstanceStatus, InstanceType};
/// A simulated SSH key.
pub use ssh_key::SshKey;
/// The three collections plus the status-bar summary.
pub use store::{ResourceStore, Summary};
