//! Event Emitter Diagnostics
//!
//! Provides the optional diagnostics channel used by the event emitter. All
//! output is inert unless the owning emitter was built with logging enabled.
//!
//! # Features
//!
//! - **Tagged output**: every line is prefixed with `[event-emitter]`
//! - **Three channels**: `log`, `error` and `assert`
//! - **Pluggable sinks**: stderr, the `log` facade, `tracing`, or in-memory
//! - **Environment-controlled format**: pretty, compact or JSON
//!
//! # Usage
//!
//! ```rust
//! use emitter_log::{Diagnostics, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = MemorySink::new();
//! let diagnostics = Diagnostics::new(true, Arc::new(sink.clone()));
//!
//! diagnostics.log("registered listener");
//! diagnostics.assert(false, "unknown event: click");
//!
//! assert_eq!(sink.len(), 2);
//! assert!(sink.contains("unknown event: click"));
//! ```
//!
//! # Environment Variables
//!
//! - `EVENT_EMITTER_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `EVENT_EMITTER_LOG_COLOR=1|0` - Enable/disable colors
//! - `EVENT_EMITTER_LOG_TIMESTAMPS=1|0` - Include timestamps

pub mod sink;

pub use sink::{LogSink, MemorySink, Record, Sink, StderrSink};

#[cfg(feature = "tracing")]
pub use sink::TracingSink;

use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use std::sync::Arc;

/// Tag prepended to every diagnostics line.
pub const TAG: &str = "[event-emitter]";

// ============================================================================
// Log Levels
// ============================================================================

/// Severity of a diagnostics record.
///
/// [`Diagnostics`] only writes `Info` and `Error`. `Debug` and `Warn` are
/// available to custom [`Sink`] implementations and map onto the `log` and
/// `tracing` levels of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Debug level
    Debug = 0,
    /// Info level, used by [`Diagnostics::log`]
    Info = 1,
    /// Warning level
    Warn = 2,
    /// Error level, used by [`Diagnostics::error`] and failed assertions
    Error = 3,
}

impl Level {
    /// Get level from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            _ => None,
        }
    }

    /// Get level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Get colored level name (if color feature enabled).
    #[cfg(feature = "color")]
    pub fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error => log::Level::Error,
        }
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for rendered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable, optionally colored
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl Format {
    /// Get format from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Global Configuration
// ============================================================================

/// Global configuration (lazy initialized from the environment).
static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Rendering configuration for [`StderrSink`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format
    pub format: Format,
    /// Whether colors are enabled
    pub color: bool,
    /// Whether to include timestamps
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: Format::Json,
            color: false, // JSON output doesn't use colors
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        let format = lookup("EVENT_EMITTER_LOG_FORMAT")
            .and_then(|s| Format::from_str(&s))
            .unwrap_or(defaults.format);

        Self {
            format,
            color: flag("EVENT_EMITTER_LOG_COLOR", defaults.color),
            timestamps: flag("EVENT_EMITTER_LOG_TIMESTAMPS", defaults.timestamps),
        }
    }
}

/// Get the global configuration.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a record into a single output line.
pub fn render(level: Level, message: &str, config: &LogConfig) -> String {
    match config.format {
        Format::Pretty => render_pretty(level, message, config),
        Format::Compact => render_compact(level, message, config),
        Format::Json => render_json(level, message),
    }
}

fn render_pretty(level: Level, message: &str, config: &LogConfig) -> String {
    let mut line = String::new();

    if config.timestamps {
        let now = chrono::Local::now();
        line.push_str(&format!("{} ", now.format("%Y-%m-%d %H:%M:%S%.3f")));
    }

    #[cfg(feature = "color")]
    if config.color {
        line.push_str(&format!("{:5} ", level.colored()));
    } else {
        line.push_str(&format!("{:5} ", level.as_str()));
    }

    #[cfg(not(feature = "color"))]
    line.push_str(&format!("{:5} ", level.as_str()));

    line.push_str(message);
    line
}

fn render_compact(level: Level, message: &str, config: &LogConfig) -> String {
    let mut line = String::new();

    if config.timestamps {
        let now = chrono::Local::now();
        line.push_str(&format!("{} ", now.format("%H:%M:%S")));
    }

    line.push(level.as_str().chars().next().unwrap_or('?'));
    line.push(' ');
    line.push_str(message);
    line
}

#[cfg(feature = "json")]
fn render_json(level: Level, message: &str) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct LogEntry<'a> {
        timestamp: String,
        level: &'a str,
        message: &'a str,
    }

    let entry = LogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        message,
    };

    serde_json::to_string(&entry).unwrap_or_else(|_| message.to_string())
}

#[cfg(not(feature = "json"))]
fn render_json(level: Level, message: &str) -> String {
    // Fallback without serde - manually escape JSON strings
    format!(
        r#"{{"timestamp":"{}","level":"{}","message":"{}"}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        escape_json(message)
    )
}

#[cfg(not(feature = "json"))]
fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Gated, tagged diagnostics channel.
///
/// Every operation is a no-op unless the channel was created enabled.
#[derive(Clone)]
pub struct Diagnostics {
    enabled: bool,
    sink: Arc<dyn Sink>,
}

impl Diagnostics {
    /// Create a diagnostics channel writing to `sink`.
    pub fn new(enabled: bool, sink: Arc<dyn Sink>) -> Self {
        Self { enabled, sink }
    }

    /// Create a diagnostics channel writing to stderr.
    pub fn stderr(enabled: bool) -> Self {
        Self::new(enabled, Arc::new(StderrSink::new()))
    }

    /// A channel that never writes anything.
    pub fn disabled() -> Self {
        Self::stderr(false)
    }

    /// Whether anything will be written.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Write an informational line.
    pub fn log(&self, message: impl fmt::Display) {
        if self.enabled {
            self.sink.write(Level::Info, &format!("{} {}", TAG, message));
        }
    }

    /// Write an error line.
    pub fn error(&self, error: impl fmt::Display) {
        if self.enabled {
            self.sink.write(Level::Error, &format!("{} {}", TAG, error));
        }
    }

    /// Write `message` only when `condition` is false.
    pub fn assert(&self, condition: bool, message: impl fmt::Display) {
        if self.enabled && !condition {
            self.sink.write(
                Level::Error,
                &format!("{} Assertion failed: {}", TAG, message),
            );
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Tracing compatibility layer.
    //!
    //! Pairs with [`TracingSink`](crate::TracingSink) for hosts that do not
    //! install their own subscriber.

    use super::*;

    /// Create a tracing subscriber honouring `RUST_LOG`, defaulting to `info`.
    pub fn subscriber() -> impl tracing::Subscriber + Send + Sync {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config().color))
    }
}

// ============================================================================
// Tests
// ============================================================================
