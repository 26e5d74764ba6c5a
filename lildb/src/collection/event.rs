use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display};
use std::sync::Arc;

/// What a [StoreEvent] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreAction {
    /// The collection was loaded from its backing file.
    Loaded,
    /// The collection was written to its backing file.
    Saved,
    /// A background save failed.
    Error,
}

impl Display for StoreAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreAction::Loaded => write!(f, "loaded"),
            StoreAction::Saved => write!(f, "saved"),
            StoreAction::Error => write!(f, "error"),
        }
    }
}

/// A structured persistence event delivered to a [StoreEventListener].
///
/// Events are produced by connect (`Loaded`) and by the autosave task (`Saved` and
/// `Error`). `error` carries the failure message for `Error` events.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEvent {
    action: StoreAction,
    time: DateTime<Utc>,
    error: Option<String>,
}

impl StoreEvent {
    pub(crate) fn new(action: StoreAction, time: DateTime<Utc>, error: Option<String>) -> Self {
        StoreEvent {
            action,
            time,
            error,
        }
    }

    pub(crate) fn loaded() -> Self {
        StoreEvent::new(StoreAction::Loaded, Utc::now(), None)
    }

    pub(crate) fn saved(time: DateTime<Utc>) -> Self {
        StoreEvent::new(StoreAction::Saved, time, None)
    }

    pub(crate) fn error(message: &str) -> Self {
        StoreEvent::new(StoreAction::Error, Utc::now(), Some(message.to_string()))
    }

    pub fn action(&self) -> StoreAction {
        self.action
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Display for StoreEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error {
            Some(error) => write!(f, "{} at {}: {}", self.action, self.time.to_rfc3339(), error),
            None => write!(f, "{} at {}", self.action, self.time.to_rfc3339()),
        }
    }
}

pub trait StoreEventCallback: Send + Sync + Fn(StoreEvent) {}

impl<F> StoreEventCallback for F where F: Send + Sync + Fn(StoreEvent) {}

/// Receives [StoreEvent]s.
///
/// The callback runs synchronously on the thread that produced the event: the
/// caller's thread during connect and the timer thread during autosave.
#[derive(Clone)]
pub struct StoreEventListener {
    on_event: Arc<dyn StoreEventCallback>,
}

impl StoreEventListener {
    pub fn new(on_event: impl StoreEventCallback + 'static) -> Self {
        StoreEventListener {
            on_event: Arc::new(on_event),
        }
    }

    #[inline]
    pub(crate) fn notify(&self, event: StoreEvent) {
        (self.on_event)(event)
    }
}

impl Debug for StoreEventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreEventListener").finish()
    }
}
