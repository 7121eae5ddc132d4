//! Append-only session scrollback.

/// One submitted line and its rendered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// The raw line as typed.
    pub input: String,
    /// Rendered output; empty for commands with no visible output.
    pub output: String,
    /// Display-formatted time of execution.
    pub timestamp: String,
}

/// Ordered record of executed commands.
///
/// Entries are never edited or reordered; the only removal is a full reset.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return a reference to it.
    pub fn append(&mut self, entry: LogEntry) -> &LogEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
