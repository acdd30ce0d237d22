//! Event emitter implementation

use crate::config::EmitterConfig;
use crate::error::{EmitterError, Result};
use crate::id::EventId;
use crate::listener::{Listener, ListenerError};
use crate::record::EventRecord;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use emitter_log::{Diagnostics, Sink, StderrSink};
use emitter_validation::Validate;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Synchronous registry mapping event identifiers to listeners
///
/// Clones share the same registrations.
#[derive(Clone)]
pub struct EventEmitter {
    /// Records registered for each event identifier
    events: Arc<DashMap<EventId, EventRecord>>,

    /// Configuration
    config: Arc<EmitterConfig>,

    diagnostics: Diagnostics,
}

/// One entry of [`EventEmitter::snapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub event: String,
    pub listeners: usize,
}

impl EventEmitter {
    /// Create an emitter with logging disabled
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Create an emitter with custom config, writing diagnostics to stderr
    pub fn with_config(config: EmitterConfig) -> Self {
        Self::with_sink(config, Arc::new(StderrSink::new()))
    }

    /// Create an emitter writing diagnostics to `sink`
    pub fn with_sink(config: EmitterConfig, sink: Arc<dyn Sink>) -> Self {
        Self {
            events: Arc::new(DashMap::new()),
            diagnostics: Diagnostics::new(config.logging_enabled(), sink),
            config: Arc::new(config),
        }
    }

    /// Create an emitter from untyped configuration
    ///
    /// Fails when the value does not match the configuration schema.
    pub fn from_value(config: Option<&Value>) -> Result<Self> {
        Ok(Self::with_config(EmitterConfig::from_value(config)?))
    }

    pub fn builder() -> EventEmitterBuilder {
        EventEmitterBuilder::new()
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Register a closure for an event
    ///
    /// Failures are reported through diagnostics only; the emitter is always
    /// returned so calls can be chained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use emitter_events::EventEmitter;
    ///
    /// let emitter = EventEmitter::new();
    /// emitter
    ///     .register("open", |_| Ok(()))
    ///     .register("close", |_| Ok(()));
    ///
    /// assert_eq!(emitter.event_count(), 2);
    /// ```
    pub fn register<F>(&self, event: impl Into<EventId>, listener: F) -> &Self
    where
        F: Fn(&[Value]) -> std::result::Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.register_listener(event, Listener::new(listener))
    }

    /// Register a shared listener handle for an event
    ///
    /// Registering the same handle twice for one event is a no-op.
    pub fn register_listener(&self, event: impl Into<EventId>, listener: Listener) -> &Self {
        if let Err(e) = self.try_register(event, listener) {
            self.diagnostics.error(&e);
        }
        self
    }

    /// Register a listener, returning any validation failure
    pub fn try_register(&self, event: impl Into<EventId>, listener: Listener) -> Result<()> {
        let event = event.into();
        event.validate().map_err(EmitterError::InvalidEvent)?;

        match self.events.entry(event) {
            Entry::Occupied(mut entry) => {
                checked(entry.key(), entry.get())?;
                entry.get_mut().listeners_mut().insert(listener);
            }
            Entry::Vacant(entry) => {
                entry.insert(EventRecord::new(listener));
            }
        }

        if self.diagnostics.is_enabled() {
            self.diagnostics
                .log(format_args!("events: {}", self.render_snapshot()));
        }

        Ok(())
    }

    /// Invoke every listener registered for `event` with `args`
    ///
    /// Always returns `true`. Failures (invalid identifier, a listener error
    /// or panic) are reported through diagnostics only; use
    /// [`try_emit`](Self::try_emit) to observe them.
    ///
    /// A panicking listener is contained, but the process-wide panic hook
    /// still runs first, so the default hook prints the panic to stderr even
    /// with logging disabled. Install a custom hook with
    /// [`std::panic::set_hook`] to silence it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use emitter_events::EventEmitter;
    /// use serde_json::json;
    ///
    /// let emitter = EventEmitter::new();
    /// emitter.register("x", |args| {
    ///     assert_eq!(args, &[json!(42)]);
    ///     Ok(())
    /// });
    ///
    /// assert!(emitter.emit("x", &[json!(42)]));
    /// assert!(emitter.emit("never-registered", &[]));
    /// ```
    pub fn emit(&self, event: impl Into<EventId>, args: &[Value]) -> bool {
        match self.dispatch(&event.into(), args) {
            Ok(_) => {}
            // already reported by the assertion in dispatch
            Err(EmitterError::UnknownEvent(_)) => {}
            Err(e) => self.diagnostics.error(&e),
        }
        true
    }

    /// Invoke every listener registered for `event`, reporting the outcome
    ///
    /// Returns the number of listeners invoked. The first failing listener
    /// stops the emission. Panics are reported as
    /// [`EmitterError::ListenerPanicked`] after the panic hook has run.
    pub fn try_emit(&self, event: impl Into<EventId>, args: &[Value]) -> Result<usize> {
        self.dispatch(&event.into(), args)
    }

    fn dispatch(&self, event: &EventId, args: &[Value]) -> Result<usize> {
        event.validate().map_err(EmitterError::InvalidEvent)?;

        self.diagnostics.assert(
            self.events.contains_key(event),
            format_args!("unknown event: {}", event),
        );

        // Snapshot so listeners may register or emit on this emitter.
        let listeners = self
            .listeners_of(event)?
            .ok_or_else(|| EmitterError::UnknownEvent(event.to_string()))?;

        for (index, listener) in listeners.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener.call(args))) {
                Ok(Ok(())) => {}
                Ok(Err(source)) => {
                    return Err(EmitterError::ListenerFailed {
                        event: event.to_string(),
                        index,
                        source,
                    });
                }
                Err(payload) => {
                    return Err(EmitterError::ListenerPanicked {
                        event: event.to_string(),
                        index,
                        message: panic_message(payload.as_ref()),
                    });
                }
            }
        }

        Ok(listeners.len())
    }

    /// Validated copy of the listeners for `event`, if it is registered
    fn listeners_of(&self, event: &EventId) -> Result<Option<Vec<Listener>>> {
        match self.events.get(event) {
            Some(record) => Ok(Some(checked(event, &record)?.listeners().to_vec())),
            None => Ok(None),
        }
    }

    /// Whether any listener is registered for `event`
    pub fn contains(&self, event: impl Into<EventId>) -> bool {
        self.events.contains_key(&event.into())
    }

    /// Get listener count for an event
    pub fn listener_count(&self, event: impl Into<EventId>) -> usize {
        self.events
            .get(&event.into())
            .map(|record| record.listeners().len())
            .unwrap_or(0)
    }

    /// Number of registered event identifiers
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Registered event identifiers, in no particular order
    pub fn event_ids(&self) -> Vec<EventId> {
        self.events.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Listener counts per event, sorted by event name
    pub fn snapshot(&self) -> Vec<EventSummary> {
        let mut summary: Vec<EventSummary> = self
            .events
            .iter()
            .map(|entry| EventSummary {
                event: entry.key().to_string(),
                listeners: entry.value().listeners().len(),
            })
            .collect();
        summary.sort_by(|a, b| a.event.cmp(&b.event));
        summary
    }

    fn render_snapshot(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|e| e.to_string())
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("events", &self.events.len())
            .field("config", &self.config)
            .finish()
    }
}

fn checked<'a>(event: &EventId, record: &'a EventRecord) -> Result<&'a EventRecord> {
    record
        .validate()
        .map_err(|source| EmitterError::InvalidRecord {
            event: event.to_string(),
            source,
        })?;
    Ok(record)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Event emitter builder
pub struct EventEmitterBuilder {
    config: EmitterConfig,
    sink: Option<Arc<dyn Sink>>,
}

impl EventEmitterBuilder {
    /// Create new event emitter builder
    pub fn new() -> Self {
        Self {
            config: EmitterConfig::default(),
            sink: None,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: EmitterConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable/disable logging
    pub fn logging(mut self, enabled: bool) -> Self {
        self.config.logging = Some(enabled);
        self
    }

    /// Write diagnostics to `sink` instead of stderr
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Write diagnostics as `tracing` events
    #[cfg(feature = "tracing")]
    pub fn tracing(self) -> Self {
        self.sink(Arc::new(emitter_log::TracingSink))
    }

    /// Build the event emitter
    pub fn build(self) -> EventEmitter {
        match self.sink {
            Some(sink) => EventEmitter::with_sink(self.config, sink),
            None => EventEmitter::with_config(self.config),
        }
    }
}

impl Default for EventEmitterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
