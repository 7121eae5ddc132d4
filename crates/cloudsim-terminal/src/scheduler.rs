//! Deferred resolution of simulated `git clone` operations.
//!
//! A clone with delay `n` stays in the cloning state while the next `n`
//! commands run, and resolves at the start of the command after that. Each
//! repository has at most one pending transition.

use cloudsim_store::{RepoStatus, ResourceStore};
use cloudsim_types::error::{Result, SimError};

#[derive(Debug, Clone)]
struct PendingClone {
    repo: String,
    remaining: u32,
    outcome: RepoStatus,
}

/// Queue of clones waiting to reach their terminal state.
#[derive(Debug, Clone, Default)]
pub struct CloneScheduler {
    pending: Vec<PendingClone>,
}

impl CloneScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `repo` to resolve to `outcome` after `delay` commands.
    ///
    /// With no delay the repository resolves immediately.
    pub fn schedule(
        &mut self,
        store: &mut ResourceStore,
        repo: &str,
        delay: u32,
        outcome: RepoStatus,
    ) -> Result<()> {
        if self.is_pending(repo) {
            return Err(SimError::InvalidStateTransition(format!(
                "repository '{repo}' already has a pending clone"
            )));
        }
        if delay == 0 {
            return store.repos.update(repo, |r| r.resolve(outcome));
        }
        log::debug!("clone of {repo} resolves to {outcome} in {delay} command(s)");
        self.pending.push(PendingClone {
            repo: repo.to_string(),
            remaining: delay,
            outcome,
        });
        Ok(())
    }

    /// Advance one command. Returns the repositories resolved by this tick.
    pub fn tick(&mut self, store: &mut ResourceStore) -> Vec<(String, RepoStatus)> {
        let mut resolved = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for mut job in self.pending.drain(..) {
            if job.remaining > 0 {
                job.remaining -= 1;
                still_pending.push(job);
                continue;
            }
            match store.repos.update(&job.repo, |r| r.resolve(job.outcome)) {
                Ok(()) => resolved.push((job.repo, job.outcome)),
                Err(e) => log::warn!("dropping clone of {}: {e}", job.repo),
            }
        }

        self.pending = still_pending;
        resolved
    }

    pub fn is_pending(&self, repo: &str) -> bool {
        self.pending.iter().any(|job| job.repo == repo)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
