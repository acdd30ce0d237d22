// Error types for the event emitter

use crate::listener::ListenerError;
use emitter_validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitterError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(ValidationErrors),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(ValidationErrors),

    #[error("Malformed record for event {event}: {source}")]
    InvalidRecord {
        event: String,
        source: ValidationErrors,
    },

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Listener #{index} for event {event} failed: {source}")]
    ListenerFailed {
        event: String,
        index: usize,
        source: ListenerError,
    },

    #[error("Listener #{index} for event {event} panicked: {message}")]
    ListenerPanicked {
        event: String,
        index: usize,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, EmitterError>;
