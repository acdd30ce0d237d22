//! Diagnostics sinks

use crate::{Level, LogConfig};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Destination for diagnostics lines.
///
/// Lines arrive already tagged; sinks only decide where they go.
pub trait Sink: Send + Sync {
    /// Write one line at `level`.
    fn write(&self, level: Level, message: &str);
}

/// Writes rendered lines to stderr.
#[derive(Debug, Clone)]
pub struct StderrSink {
    config: LogConfig,
}

impl StderrSink {
    /// Create a sink using the global, environment-derived configuration.
    pub fn new() -> Self {
        Self::with_config(crate::config().clone())
    }

    /// Create a sink with explicit rendering configuration.
    pub fn with_config(config: LogConfig) -> Self {
        Self { config }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StderrSink {
    fn write(&self, level: Level, message: &str) {
        let line = crate::render(level, message, &self.config);
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", line);
    }
}

/// Forwards lines to the `log` facade under the `event_emitter` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl Sink for LogSink {
    fn write(&self, level: Level, message: &str) {
        log::log!(target: "event_emitter", log::Level::from(level), "{}", message);
    }
}

/// Forwards lines to `tracing` events under the `event_emitter` target.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl Sink for TracingSink {
    fn write(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!(target: "event_emitter", "{}", message),
            Level::Info => tracing::info!(target: "event_emitter", "{}", message),
            Level::Warn => tracing::warn!(target: "event_emitter", "{}", message),
            Level::Error => tracing::error!(target: "event_emitter", "{}", message),
        }
    }
}

/// A captured diagnostics line.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<Record>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured records, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Captured messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    /// Captured records at `level`.
    pub fn at_level(&self, level: Level) -> Vec<Record> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    /// Whether any captured message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records.lock().iter().any(|r| r.message.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, level: Level, message: &str) {
        self.records.lock().push(Record {
            level,
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Format;

    #[test]
    fn test_memory_sink_shares_buffer_between_clones() {
        let sink = MemorySink::new();
        let clone = sink.clone();

        clone.write(Level::Info, "one");
        sink.write(Level::Error, "two");

        assert_eq!(sink.len(), 2);
        assert_eq!(clone.messages(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(sink.at_level(Level::Error).len(), 1);
    }

    #[test]
    fn test_memory_sink_clear() {
        let sink = MemorySink::new();
        sink.write(Level::Info, "one");
        assert!(sink.contains("one"));

        sink.clear();
        assert!(sink.is_empty());
        assert!(!sink.contains("one"));
    }

    #[test]
    fn test_stderr_sink_accepts_writes() {
        let sink = StderrSink::with_config(LogConfig {
            format: Format::Compact,
            color: false,
            timestamps: false,
        });
        sink.write(Level::Info, "[event-emitter] stderr smoke test");
    }

    #[test]
    fn test_log_sink_without_logger_is_silent() {
        LogSink.write(Level::Error, "[event-emitter] no logger installed");
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_tracing_sink_with_subscriber() {
        let subscriber = crate::tracing_compat::subscriber();
        tracing::subscriber::with_default(subscriber, || {
            TracingSink.write(Level::Warn, "[event-emitter] via tracing");
        });
    }
}
