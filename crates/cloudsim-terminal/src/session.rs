//! A complete terminal session: registry, resources, log and clock.

use cloudsim_store::{IdGenerator, ResourceStore, Summary};
use cloudsim_types::config::SimConfig;

use crate::clock::{Clock, SystemClock};
use crate::commands::register_builtins;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment};
use crate::parser::parse;
use crate::scheduler::CloneScheduler;
use crate::session_log::{LogEntry, SessionLog};

/// Banner shown when a session starts. Not part of the log.
pub const WELCOME_BANNER: &str =
    "Welcome to Cloud Terminal Simulator v2.0\nType 'help' to see available commands";

/// Owns every piece of state one simulated terminal needs.
///
/// Each call to [`Session::execute`] runs one command to completion. Command
/// errors never escape: they become the output of the entry they belong to.
pub struct Session {
    registry: CommandRegistry,
    store: ResourceStore,
    ids: IdGenerator,
    scheduler: CloneScheduler,
    log: SessionLog,
    config: SimConfig,
    clock: Box<dyn Clock>,
}

impl Session {
    /// Start a session using local wall-clock time.
    pub fn new(config: SimConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Start a session with an explicit timestamp source.
    pub fn with_clock(config: SimConfig, clock: Box<dyn Clock>) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("{e}; out-of-range values are clamped when used");
        }
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        log::debug!(
            "session for {}@{} ({} commands)",
            config.user,
            config.hostname,
            registry.list_commands().len()
        );
        Self {
            registry,
            store: ResourceStore::new(),
            ids: IdGenerator::from_seed(config.seed),
            scheduler: CloneScheduler::new(),
            log: SessionLog::new(),
            config,
            clock,
        }
    }

    /// Run one input line.
    ///
    /// Blank input is ignored and returns `None`. `clear` empties the log and
    /// also returns `None`. Everything else appends exactly one entry, which
    /// is returned.
    pub fn execute(&mut self, line: &str) -> Option<&LogEntry> {
        let parsed = parse(line)?;

        for (repo, status) in self.scheduler.tick(&mut self.store) {
            log::info!("clone of {repo} finished: {status}");
        }

        let mut env = Environment {
            store: &mut self.store,
            ids: &mut self.ids,
            scheduler: &mut self.scheduler,
            config: &self.config,
            clock: self.clock.as_ref(),
        };
        let output = match self.registry.dispatch(&parsed, &mut env) {
            Ok(CommandOutput::Clear) => {
                self.log.clear();
                return None;
            },
            Ok(output) => output.into_text(),
            Err(e) => {
                log::warn!("{}: {e}", parsed.command);
                e.to_string()
            },
        };

        Some(self.log.append(LogEntry {
            input: line.to_string(),
            output,
            timestamp: self.clock.now(),
        }))
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current path shown in the prompt.
    pub fn prompt(&self) -> &str {
        &self.config.home
    }

    pub fn welcome(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Counts for the status bar.
    pub fn summary(&self) -> Summary {
        self.store.summary()
    }
}
