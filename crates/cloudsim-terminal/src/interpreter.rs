//! Command trait, registry, and dispatch logic.

use std::collections::HashMap;

use cloudsim_store::{IdGenerator, ResourceStore};
use cloudsim_types::config::SimConfig;
use cloudsim_types::error::{Result, SimError};

use crate::clock::Clock;
use crate::parser::ParsedLine;
use crate::scheduler::CloneScheduler;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Tabular data (header row + data rows).
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Command produced no visible output.
    None,
    /// Signal to clear the session log.
    Clear,
}

impl CommandOutput {
    /// Build a table from string-like headers.
    pub fn table(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self::Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// Render to the text stored in the session log.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Table { headers, rows } => render_table(&headers, &rows),
            Self::None | Self::Clear => String::new(),
        }
    }
}

/// Left-aligned columns separated by two spaces; trailing padding trimmed.
fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let format_row = |cells: &[String]| {
        let line = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        line.trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(headers));
    for row in rows {
        lines.push(format_row(row.as_slice()));
    }
    lines.join("\n")
}

/// Mutable session state passed to every command.
pub struct Environment<'a> {
    /// Simulated resources.
    pub store: &'a mut ResourceStore,
    /// Identifier and key-material source.
    pub ids: &'a mut IdGenerator,
    /// Pending clone transitions.
    pub scheduler: &'a mut CloneScheduler,
    /// Session configuration.
    pub config: &'a SimConfig,
    /// Timestamp source for created resources.
    pub clock: &'a dyn Clock,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ping <host>").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "general"
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;

    /// Reject argument lists shorter than `min` or longer than `max`.
    fn check_arity(&self, args: &[&str], min: usize, max: usize) -> Result<()> {
        if args.len() < min {
            return Err(SimError::missing(self.name(), self.usage()));
        }
        if args.len() > max {
            return Err(SimError::InvalidArgument(format!(
                "{}: too many arguments\nusage: {}",
                self.name(),
                self.usage()
            )));
        }
        Ok(())
    }
}

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Look up a registered command.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|cmd| cmd.as_ref())
    }

    /// Execute a parsed line. Command names are case-sensitive.
    pub fn dispatch(&self, parsed: &ParsedLine, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let args = parsed.arg_refs();

        // `help` needs registry access, so it is intercepted here.
        if parsed.command == "help" {
            return self.execute_help(&args);
        }

        match self.commands.get(parsed.command.as_str()) {
            Some(cmd) => {
                log::debug!("dispatch {} {:?}", cmd.name(), args);
                cmd.execute(&args, env)
            },
            None => Err(SimError::UnknownCommand(parsed.command.clone())),
        }
    }

    /// Built-in help: the static reference, or one command's usage.
    fn execute_help(&self, args: &[&str]) -> Result<CommandOutput> {
        match args {
            [] => Ok(CommandOutput::Text(crate::commands::HELP_TEXT.to_string())),
            ["help"] => Ok(CommandOutput::Text(
                "help (general)\n  Show the command reference\n  Usage: help [command]"
                    .to_string(),
            )),
            [name] => match self.commands.get(*name) {
                Some(cmd) => Ok(CommandOutput::Text(format!(
                    "{} ({})\n  {}\n  Usage: {}",
                    cmd.name(),
                    cmd.category(),
                    cmd.description(),
                    cmd.usage()
                ))),
                None => Err(SimError::UnknownCommand(name.to_string())),
            },
            _ => Err(SimError::InvalidArgument(
                "help: too many arguments\nusage: help [command]".to_string(),
            )),
        }
    }

    /// Return a sorted list of (name, description) pairs.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        let mut cmds: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|c| (c.name(), c.description()))
            .collect();
        cmds.sort_by_key(|(name, _)| *name);
        cmds
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Require `args[0]` to be `expected`, returning the remaining arguments.
///
/// Used by the `<verb> instance <name>` family.
pub fn expect_subcommand<'a, 'b>(
    cmd: &dyn Command,
    args: &'a [&'b str],
    expected: &str,
) -> Result<&'a [&'b str]> {
    match args.split_first() {
        None => Err(SimError::missing(cmd.name(), cmd.usage())),
        Some((sub, rest)) if *sub == expected => Ok(rest),
        Some((sub, _)) => Err(SimError::unknown_subcommand(cmd.name(), sub, cmd.usage())),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::parser::parse;

    /// Owned state backing an `Environment` in unit tests.
    pub(crate) struct Harness {
        pub store: ResourceStore,
        pub ids: IdGenerator,
        pub scheduler: CloneScheduler,
        pub config: SimConfig,
        pub clock: FixedClock,
    }

    impl Harness {
        pub(crate) fn new() -> Self {
            Self {
                store: ResourceStore::new(),
                ids: IdGenerator::seeded(42),
                scheduler: CloneScheduler::new(),
                config: SimConfig::default(),
                clock: FixedClock::new("12:00:00"),
            }
        }

        pub(crate) fn env(&mut self) -> Environment<'_> {
            Environment {
                store: &mut self.store,
                ids: &mut self.ids,
                scheduler: &mut self.scheduler,
                config: &self.config,
                clock: &self.clock,
            }
        }

        pub(crate) fn run(&mut self, reg: &CommandRegistry, line: &str) -> Result<CommandOutput> {
            let mut env = self.env();
            match parse(line) {
                Some(parsed) => reg.dispatch(&parsed, &mut env),
                None => Ok(CommandOutput::None),
            }
        }

        /// Run and render, panicking on error.
        pub(crate) fn text(&mut self, reg: &CommandRegistry, line: &str) -> String {
            match self.run(reg, line) {
                Ok(out) => out.into_text(),
                Err(e) => panic!("`{line}` failed: {e}"),
            }
        }
    }

    struct EchoCmd;
    impl Command for EchoCmd {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Print arguments"
        }
        fn usage(&self) -> &str {
            "echo [text...]"
        }
        fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::Text(args.join(" ")))
        }
    }

    struct PairCmd;
    impl Command for PairCmd {
        fn name(&self) -> &str {
            "pair"
        }
        fn description(&self) -> &str {
            "Needs exactly two arguments"
        }
        fn usage(&self) -> &str {
            "pair <a> <b>"
        }
        fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
            self.check_arity(args, 2, 2)?;
            Ok(CommandOutput::Text(format!("{}+{}", args[0], args[1])))
        }
    }

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoCmd));
        reg.register(Box::new(PairCmd));
        reg
    }

    #[test]
    fn register_and_execute() {
        let reg = registry();
        let mut h = Harness::new();
        assert_eq!(h.text(&reg, "echo hello world"), "hello world");
    }

    #[test]
    fn multiple_spaces_between_args() {
        let reg = registry();
        let mut h = Harness::new();
        assert_eq!(h.text(&reg, "  echo   hello    world  "), "hello world");
    }

    #[test]
    fn empty_input() {
        let reg = registry();
        let mut h = Harness::new();
        assert_eq!(h.run(&reg, "   ").unwrap(), CommandOutput::None);
    }

    #[test]
    fn unknown_command_names_the_word() {
        let reg = registry();
        let mut h = Harness::new();
        let err = h.run(&reg, "foobar123").unwrap_err();
        assert_eq!(format!("{err}"), "command not found: foobar123");
    }

    #[test]
    fn command_names_are_case_sensitive() {
        let reg = registry();
        let mut h = Harness::new();
        assert!(matches!(
            h.run(&reg, "ECHO hi"),
            Err(SimError::UnknownCommand(_))
        ));
    }

    #[test]
    fn arity_too_few_and_too_many() {
        let reg = registry();
        let mut h = Harness::new();
        assert!(matches!(
            h.run(&reg, "pair a"),
            Err(SimError::MissingArgument { .. })
        ));
        let err = h.run(&reg, "pair a b c").unwrap_err();
        assert!(format!("{err}").contains("too many arguments"));
        assert_eq!(h.text(&reg, "pair a b"), "a+b");
    }

    #[test]
    fn help_for_one_command() {
        let reg = registry();
        let mut h = Harness::new();
        let out = h.text(&reg, "help pair");
        assert!(out.contains("Usage: pair <a> <b>"));
        assert!(h.run(&reg, "help nope").is_err());
    }

    #[test]
    fn register_replaces_existing_command() {
        struct Other;
        impl Command for Other {
            fn name(&self) -> &str {
                "echo"
            }
            fn description(&self) -> &str {
                "replacement"
            }
            fn usage(&self) -> &str {
                "echo"
            }
            fn execute(&self, _: &[&str], _: &mut Environment<'_>) -> Result<CommandOutput> {
                Ok(CommandOutput::Text("B".into()))
            }
        }
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(EchoCmd));
        reg.register(Box::new(Other));
        let cmds = reg.list_commands();
        assert_eq!(cmds, [("echo", "replacement")]);
    }

    #[test]
    fn table_rendering_aligns_columns() {
        let out = CommandOutput::table(
            &["NAME", "STATUS"],
            vec![
                vec!["web1".into(), "running".into()],
                vec!["database-01".into(), "stopped".into()],
            ],
        );
        assert_eq!(
            out.into_text(),
            "NAME         STATUS\nweb1         running\ndatabase-01  stopped"
        );
    }

    #[test]
    fn signals_render_empty() {
        assert_eq!(CommandOutput::Clear.into_text(), "");
        assert_eq!(CommandOutput::None.into_text(), "");
    }

    #[test]
    fn expect_subcommand_paths() {
        let cmd = PairCmd;
        assert_eq!(expect_subcommand(&cmd, &["x", "y"], "x").unwrap(), ["y"]);
        assert!(matches!(
            expect_subcommand(&cmd, &[], "x"),
            Err(SimError::MissingArgument { .. })
        ));
        assert!(matches!(
            expect_subcommand(&cmd, &["z"], "x"),
            Err(SimError::UnknownSubcommand { .. })
        ));
    }
}
