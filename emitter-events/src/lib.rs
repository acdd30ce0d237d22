//! Synchronous publish/subscribe registry
//!
//! This crate maps event identifiers to ordered sets of listeners and
//! invokes them on demand.
//!
//! ## Features
//!
//! - **Event Emitter** - Register listeners and emit events by identifier
//! - **Tokens** - Opaque identities usable in place of event names
//! - **Synchronous** - Listeners run on the caller's thread, in registration order
//! - **Quiet by default** - Failures go to a diagnostics sink instead of the caller
//!
//! ## Quick Start
//!
//! ```rust
//! use emitter_events::*;
//! use std::sync::{Arc, Mutex};
//!
//! let emitter = EventEmitter::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = seen.clone();
//! emitter.register("user_created", move |args| {
//!     sink.lock().unwrap().extend_from_slice(args);
//!     Ok(())
//! });
//!
//! emitter.emit("user_created", &[json!("alice@example.com")]);
//! assert_eq!(*seen.lock().unwrap(), vec![json!("alice@example.com")]);
//! ```
//!
//! ## Tokens
//!
//! ```rust
//! use emitter_events::*;
//!
//! let ready = Token::new("ready");
//! let emitter = EventEmitter::new();
//! emitter.register(&ready, |_| Ok(()));
//!
//! // same description, different identity
//! assert!(!emitter.contains(Token::new("ready")));
//! assert!(emitter.contains(&ready));
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! let emitter = EventEmitterBuilder::new()
//!     .logging(true)                  // Write diagnostics
//!     .sink(Arc::new(LogSink))        // ... through the `log` facade
//!     .build();
//! ```
//!
//! ## Error Handling
//!
//! `emit` swallows failures. Use `try_emit` to observe them:
//!
//! ```rust,ignore
//! match emitter.try_emit("user_created", &[]) {
//!     Ok(count) => println!("{} listeners ran", count),
//!     Err(EmitterError::UnknownEvent(name)) => eprintln!("nobody listens to {}", name),
//!     Err(e) => eprintln!("Emit error: {}", e),
//! }
//! ```

pub mod config;
pub mod emitter;
pub mod error;
pub mod id;
pub mod listener;
pub mod record;

pub use config::{EmitterConfig, LOGGING_ENV};
pub use emitter::{EventEmitter, EventEmitterBuilder, EventSummary};
pub use error::{EmitterError, Result};
pub use id::{EventId, Token};
pub use listener::{Listener, ListenerError, ListenerSet};
pub use record::EventRecord;

pub use emitter_log::{Diagnostics, Level, LogSink, MemorySink, Sink, StderrSink};
#[cfg(feature = "tracing")]
pub use emitter_log::TracingSink;
pub use serde_json::{Value, json};
