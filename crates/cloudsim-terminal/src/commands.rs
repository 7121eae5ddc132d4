//! Built-in commands for the simulator terminal: clear, pwd, ls, status.

use cloudsim_store::{Named, RepoStatus};
use cloudsim_types::error::{Result, SimError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Static command reference returned by `help`.
pub const HELP_TEXT: &str = "\
Available commands:

System:
  help [command]                 Show this reference, or one command's usage
  clear                          Clear the screen
  pwd                            Show current directory
  ls [path]                      List files
  status                         Show resource counts

SSH:
  ssh-keygen [name]              Generate a key pair
  ssh-add <name>                 Add a key to the agent
  ssh-list                       List keys
  ssh-remove <name>              Delete a key
  ssh <user@host>                Connect to a host

Cloud:
  create instance <name> <type>  Create an instance
                                 (compute|database|storage|network|security)
  instances list [type]          List instances
  start instance <name>          Start a stopped instance
  stop instance <name>           Stop a running instance
  describe instance <name>       Show instance details
  delete instance <name>         Delete an instance

Git:
  git clone <url> [name]         Clone a repository
  git list                       List repositories
  git status <name>              Show a repository's clone status

Network:
  ping <host>                    Send echo requests
  ifconfig                       Show network interfaces
  netstat                        Show network connections
  curl <url>                     Fetch a URL
  wget <url>                     Download a URL";

/// Files every home directory starts with.
const HOME_ENTRIES: &[&str] = &[".ssh/", "Documents/", "Downloads/", "README.md"];

/// Whether `name` collides with one of the fixed home directory entries.
pub(crate) fn is_home_entry(name: &str) -> bool {
    HOME_ENTRIES
        .iter()
        .any(|entry| entry.trim_end_matches('/') == name)
}

/// Map an `ls` argument to a path relative to `home`.
///
/// The home prefix only matches on a path segment boundary.
fn relative_to_home<'a>(path: &'a str, home: &str) -> &'a str {
    let path = path.trim_end_matches('/');
    match path.strip_prefix(home.trim_end_matches('/')) {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => path,
    }
}

/// Register all built-in commands into a registry.
///
/// `help` is not registered here; the registry intercepts it.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(StatusCmd));
    crate::register_cloud_commands(reg);
    crate::register_ssh_commands(reg);
    crate::register_network_commands(reg);
    crate::register_git_commands(reg);
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the screen"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 0, 0)?;
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 0, 0)?;
        Ok(CommandOutput::Text(env.config.home.clone()))
    }
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        "ls [path]"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 0, 1)?;
        let target = args
            .first()
            .map(|p| relative_to_home(p, &env.config.home))
            .unwrap_or("");

        let lines: Vec<String> = match target {
            "" | "." => {
                let mut lines: Vec<String> = HOME_ENTRIES.iter().map(|e| e.to_string()).collect();
                lines.extend(
                    env.store
                        .repos
                        .iter()
                        .filter(|r| r.status() == RepoStatus::Cloned)
                        .map(|r| format!("{}/", r.name())),
                );
                lines
            },
            ".ssh" => env
                .store
                .keys
                .iter()
                .flat_map(|k| [k.name().to_string(), format!("{}.pub", k.name())])
                .chain(std::iter::once("known_hosts".to_string()))
                .collect(),
            "Documents" | "Downloads" => Vec::new(),
            other => match env.store.repos.get(other) {
                Some(repo) if repo.status() == RepoStatus::Cloned => {
                    vec![".git/".into(), "README.md".into(), "src/".into()]
                },
                _ => {
                    return Err(SimError::InvalidArgument(format!(
                        "ls: cannot access '{}': No such file or directory",
                        args[0]
                    )));
                },
            },
        };

        if lines.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

struct StatusCmd;
impl Command for StatusCmd {
    fn name(&self) -> &str {
        "status"
    }
    fn description(&self) -> &str {
        "Show resource counts"
    }
    fn usage(&self) -> &str {
        "status"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        self.check_arity(args, 0, 0)?;
        Ok(CommandOutput::Text(env.store.summary().to_string()))
    }
}
