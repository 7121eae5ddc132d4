//! Command interpreter and session for the cloud terminal simulator.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. A `Session` parses each input
//! line, dispatches it through the registry against the resource store, and
//! appends the rendered result to the session log.

mod clock;
mod cloud_commands;
mod commands;
mod git_commands;
mod interpreter;
mod network_commands;
mod parser;
mod scheduler;
mod session;
mod session_log;
mod ssh_commands;

/// Timestamp source for log entries.
pub use clock::{Clock, FixedClock, SystemClock};
/// Register instance lifecycle commands (create/start/stop/describe/delete).
pub use cloud_commands::register_cloud_commands;
/// Register every built-in command family into a registry.
pub use commands::{HELP_TEXT, register_builtins};
/// Register the `git` command.
pub use git_commands::register_git_commands;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text, table, signals).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Mutable state handed to every command.
pub use interpreter::Environment;
/// Register network commands (ping, ifconfig, netstat, curl, wget).
pub use network_commands::register_network_commands;
/// Whitespace tokenizer.
pub use parser::{ParsedLine, parse};
/// Deferred clone resolution.
pub use scheduler::CloneScheduler;
/// A complete interactive session.
pub use session::{Session, WELCOME_BANNER};
/// Append-only scrollback.
pub use session_log::{LogEntry, SessionLog};
/// Register SSH key and connection commands.
pub use ssh_commands::register_ssh_commands;
