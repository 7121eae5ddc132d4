//! Simulated Git repository clones.
//!
//! A repository starts in [`RepoStatus::Cloning`] and moves exactly once to
//! either [`RepoStatus::Cloned`] or [`RepoStatus::Error`].

use std::fmt;

use cloudsim_types::error::{Result, SimError};

use crate::collection::Named;

/// URL schemes the simulator accepts as clone sources.
const SCHEMES: &[&str] = &["https://", "http://", "ssh://", "git://"];

/// Clone progress of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    Cloning,
    Cloned,
    Error,
}

impl RepoStatus {
    pub fn is_terminal(self) -> bool {
        self != Self::Cloning
    }
}

impl fmt::Display for RepoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cloning => "cloning",
            Self::Cloned => "cloned",
            Self::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRepo {
    name: String,
    url: String,
    status: RepoStatus,
}

impl GitRepo {
    /// A repository whose clone has just begun.
    pub fn cloning(name: String, url: String) -> Self {
        Self {
            name,
            url,
            status: RepoStatus::Cloning,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> RepoStatus {
        self.status
    }

    /// Move a cloning repository to its terminal state.
    ///
    /// Rejected once the repository has already resolved, and when `outcome`
    /// is not itself terminal.
    pub fn resolve(&mut self, outcome: RepoStatus) -> Result<()> {
        if self.status.is_terminal() {
            return Err(SimError::InvalidStateTransition(format!(
                "repository '{}' already {}",
                self.name, self.status
            )));
        }
        if !outcome.is_terminal() {
            return Err(SimError::InvalidStateTransition(format!(
                "repository '{}' cannot resolve to {outcome}",
                self.name
            )));
        }
        log::info!("repository {}: {} -> {outcome}", self.name, self.status);
        self.status = outcome;
        Ok(())
    }
}

impl Named for GitRepo {
    const KIND: &'static str = "repository";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Derive a directory name from a clone URL: the last path segment with any
/// `.git` suffix removed.
pub fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    is_valid_repo_name(name).then(|| name.to_string())
}

/// Whether `name` is usable as a checkout directory.
pub fn is_valid_repo_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Whether the URL looks like something `git clone` could fetch.
///
/// Accepts `scheme://host/path` for the known schemes and scp-style
/// `user@host:path`.
pub fn is_cloneable_url(url: &str) -> bool {
    if let Some(rest) = SCHEMES.iter().find_map(|s| url.strip_prefix(s)) {
        return match rest.split_once('/') {
            Some((host, path)) => is_valid_host(host) && !path.trim_matches('/').is_empty(),
            None => false,
        };
    }
    if let Some((user_host, path)) = url.split_once(':')
        && let Some((user, host)) = user_host.split_once('@')
    {
        return !user.is_empty() && is_valid_host(host) && !path.trim_matches('/').is_empty();
    }
    false
}

fn is_valid_host(host: &str) -> bool {
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    let host = host.split_once(':').map_or(host, |(h, _)| h);
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.'))
}

/// Outcome a simulated clone of `url` eventually reaches.
pub fn clone_outcome(url: &str) -> RepoStatus {
    if is_cloneable_url(url) {
        RepoStatus::Cloned
    } else {
        RepoStatus::Error
    }
}
