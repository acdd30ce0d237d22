// event-emitter - A minimal synchronous publish/subscribe registry
//
// This library maps event names (or opaque tokens) to listeners and invokes
// them in registration order when an event is emitted.

// Re-export core functionality
pub use emitter_events::*;

// Re-export member crates
pub use emitter_log;
pub use emitter_validation;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        EmitterConfig,
        EmitterError,
        EventEmitter,
        EventEmitterBuilder,
        EventId,
        Listener,
        ListenerError,
        MemorySink,
        Sink,
        Token,
        Value,
        json,
    };
    pub use emitter_validation::Validate;
}
