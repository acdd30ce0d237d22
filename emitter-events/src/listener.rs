//! Listener definitions

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type ListenerFn = dyn Fn(&[Value]) -> Result<(), ListenerError> + Send + Sync;

/// Listener error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListenerError {
    #[error("Listener failed: {0}")]
    Failed(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ListenerError {
    pub fn failed(message: impl Into<String>) -> Self {
        ListenerError::Failed(message.into())
    }
}

impl From<serde_json::Error> for ListenerError {
    fn from(err: serde_json::Error) -> Self {
        ListenerError::InvalidArguments(err.to_string())
    }
}

/// Shared callable invoked with the arguments passed to `emit`.
///
/// Clones share identity; a [`ListenerSet`] holds each identity at most once.
#[derive(Clone)]
pub struct Listener {
    callback: Arc<ListenerFn>,
}

impl Listener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&[Value]) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the listener
    pub fn call(&self, args: &[Value]) -> Result<(), ListenerError> {
        (self.callback)(args)
    }

    /// Whether both handles refer to the same listener
    pub fn same_as(&self, other: &Listener) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Arc::as_ptr(&self.callback).cast::<()>())
    }
}

/// Insertion-ordered listeners without duplicate identities
#[derive(Debug, Clone, Default)]
pub struct ListenerSet {
    pub(crate) listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` unless it is already present.
    ///
    /// Returns `false` when the set already held it.
    pub fn insert(&mut self, listener: Listener) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    pub fn contains(&self, listener: &Listener) -> bool {
        self.listeners.iter().any(|l| l.same_as(listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.listeners.iter()
    }

    /// Owned copy of the current listeners, in insertion order
    pub fn to_vec(&self) -> Vec<Listener> {
        self.listeners.clone()
    }
}
