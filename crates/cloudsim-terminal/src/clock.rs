//! Timestamp source for log entries and created resources.

/// Produces display-formatted timestamps.
pub trait Clock {
    fn now(&self) -> String;
}

/// Local wall-clock time, `HH:MM:SS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}

/// Always reports the same timestamp. Useful for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(timestamp: &str) -> Self {
        Self(timestamp.to_string())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}
