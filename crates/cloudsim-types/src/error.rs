//! Error types for the cloud terminal simulator.

use std::io;

/// Errors produced while evaluating a command or loading configuration.
///
/// Command-level variants are never fatal: the session renders them into the
/// output of the command that produced them.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("command not found: {0}")]
    UnknownCommand(String),

    #[error("{command}: unknown subcommand '{subcommand}'\nusage: {usage}")]
    UnknownSubcommand {
        command: String,
        subcommand: String,
        usage: String,
    },

    #[error("{command}: missing argument\nusage: {usage}")]
    MissingArgument { command: String, usage: String },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("{0}")]
    InvalidStateTransition(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl SimError {
    /// Shorthand for a [`SimError::MissingArgument`].
    pub fn missing(command: &str, usage: &str) -> Self {
        Self::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        }
    }

    /// Shorthand for a [`SimError::UnknownSubcommand`].
    pub fn unknown_subcommand(command: &str, subcommand: &str, usage: &str) -> Self {
        Self::UnknownSubcommand {
            command: command.to_string(),
            subcommand: subcommand.to_string(),
            usage: usage.to_string(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_display() {
        let e = SimError::UnknownCommand("foobar123".into());
        assert_eq!(format!("{e}"), "command not found: foobar123");
    }

    #[test]
    fn unknown_subcommand_display() {
        let e = SimError::unknown_subcommand("instances", "foo", "instances list [type]");
        let msg = format!("{e}");
        assert!(msg.starts_with("instances: unknown subcommand 'foo'"));
        assert!(msg.ends_with("usage: instances list [type]"));
    }

    #[test]
    fn missing_argument_display() {
        let e = SimError::missing("ping", "ping <host>");
        assert_eq!(format!("{e}"), "ping: missing argument\nusage: ping <host>");
    }

    #[test]
    fn duplicate_name_display() {
        let e = SimError::DuplicateName {
            kind: "instance",
            name: "web1".into(),
        };
        assert_eq!(format!("{e}"), "instance 'web1' already exists");
    }

    #[test]
    fn not_found_display() {
        let e = SimError::NotFound {
            kind: "ssh key",
            name: "deploy".into(),
        };
        assert_eq!(format!("{e}"), "ssh key 'deploy' not found");
    }

    #[test]
    fn invalid_state_transition_display_is_verbatim() {
        let e = SimError::InvalidStateTransition("instance 'db' is already running".into());
        assert_eq!(format!("{e}"), "instance 'db' is already running");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: SimError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: SimError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(SimError::Config("oops".into()));
        assert!(r.is_err());
    }
}
