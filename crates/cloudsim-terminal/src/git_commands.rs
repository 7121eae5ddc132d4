//! The `git` command: clone, list, status.

use sha2::{Digest, Sha256};

use cloudsim_store::git_repo::{clone_outcome, is_valid_repo_name, repo_name_from_url};
use cloudsim_store::{GitRepo, Named, RepoStatus};
use cloudsim_types::error::{Result, SimError};

use crate::commands::is_home_entry;
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register the `git` command.
pub fn register_git_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(GitCmd));
}

struct GitCmd;
impl Command for GitCmd {
    fn name(&self) -> &str {
        "git"
    }
    fn description(&self) -> &str {
        "Clone and inspect repositories"
    }
    fn usage(&self) -> &str {
        "git clone <url> [name] | git list | git status <name>"
    }
    fn category(&self) -> &str {
        "git"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match args.split_first() {
            None => Err(SimError::missing(self.name(), self.usage())),
            Some((&"clone", rest)) => self.clone_repo(rest, env),
            Some((&"list", rest)) => {
                self.check_arity(rest, 0, 0)?;
                Ok(list(env))
            },
            Some((&"status", rest)) => {
                self.check_arity(rest, 1, 1)?;
                status(rest[0], env)
            },
            Some((sub, _)) => Err(SimError::unknown_subcommand(self.name(), sub, self.usage())),
        }
    }
}

impl GitCmd {
    fn clone_repo(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 1, 2)?;
        let url = args[0];
        let name = match args.get(1) {
            Some(name) if is_valid_repo_name(name) => name.to_string(),
            Some(name) => {
                return Err(SimError::InvalidArgument(format!(
                    "fatal: invalid directory name '{name}'"
                )));
            },
            None => repo_name_from_url(url).ok_or_else(|| {
                SimError::InvalidArgument(format!(
                    "fatal: could not derive a directory name from '{url}'\nusage: git clone <url> [name]"
                ))
            })?,
        };
        if is_home_entry(&name) {
            return Err(SimError::InvalidArgument(format!(
                "fatal: destination path '{name}' already exists in the home directory"
            )));
        }
        if env.store.repos.contains(&name) {
            return Err(SimError::DuplicateName {
                kind: GitRepo::KIND,
                name,
            });
        }

        let outcome = clone_outcome(url);
        let delay = env.config.clone_delay;
        env.store
            .repos
            .add(GitRepo::cloning(name.clone(), url.to_string()))?;
        if let Err(e) = env.scheduler.schedule(env.store, &name, delay, outcome) {
            // Roll back so a failed schedule leaves no half-created repo.
            if let Err(rollback) = env.store.repos.remove(&name) {
                log::warn!("rollback of repo {name} failed: {rollback}");
            }
            return Err(e);
        }
        log::info!("git clone {url} into {name}");

        let mut lines = vec![format!("Cloning into '{name}'...")];
        if delay > 0 {
            lines.push(format!(
                "Clone in progress. Check with 'git status {name}'."
            ));
        } else if outcome == RepoStatus::Cloned {
            lines.extend(transfer_progress(url));
        } else {
            lines.push(format!("fatal: repository '{url}' does not exist"));
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

/// Fake transfer statistics, stable for a given URL.
fn transfer_progress(url: &str) -> Vec<String> {
    let d = Sha256::digest(url.as_bytes());
    let objects = 20 + u32::from(u16::from_be_bytes([d[0], d[1]]) % 2000);
    let deltas = objects * 2 / 5;
    let kib = objects * 3 + u32::from(d[2]);
    vec![
        format!("remote: Enumerating objects: {objects}, done."),
        format!("remote: Counting objects: 100% ({objects}/{objects}), done."),
        format!("Receiving objects: 100% ({objects}/{objects}), {kib} KiB, done."),
        format!("Resolving deltas: 100% ({deltas}/{deltas}), done."),
    ]
}

fn list(env: &Environment<'_>) -> CommandOutput {
    if env.store.repos.is_empty() {
        return CommandOutput::Text(
            "No repositories. Use 'git clone <url>' to clone one.".to_string(),
        );
    }
    let rows = env
        .store
        .repos
        .iter()
        .map(|r| {
            vec![
                r.name().to_string(),
                r.status().to_string(),
                r.url().to_string(),
            ]
        })
        .collect();
    CommandOutput::table(&["NAME", "STATUS", "URL"], rows)
}

fn status(name: &str, env: &Environment<'_>) -> Result<CommandOutput> {
    let repo = env.store.repos.get(name).ok_or_else(|| SimError::NotFound {
        kind: GitRepo::KIND,
        name: name.to_string(),
    })?;
    let detail = match repo.status() {
        RepoStatus::Cloning => "Clone in progress.",
        RepoStatus::Cloned => "On branch main\nnothing to commit, working tree clean",
        RepoStatus::Error => "Clone failed.",
    };
    Ok(CommandOutput::Text(format!(
        "Repository: {}\n  URL:    {}\n  Status: {}\n{detail}",
        repo.name(),
        repo.url(),
        repo.status()
    )))
}
