//! Error sink capability used for isolated provider failures.
//!
//! Providers never propagate environmental failures (missing modules, renamed
//! types, malformed sub-configuration). They report them here and degrade to
//! an empty result instead.

use std::{fmt, sync::Mutex};

use chrono::{DateTime, Utc};
use tracing::error;

/// A caught provider failure.
#[derive(Debug)]
pub struct ErrorEvent {
    /// Key of the provider (or component) that caught the failure.
    pub source: String,
    pub error: anyhow::Error,
    pub occurred_at: DateTime<Utc>,
}

impl ErrorEvent {
    pub fn new(source: impl Into<String>, error: impl Into<anyhow::Error>) -> Self {
        Self {
            source: source.into(),
            error: error.into(),
            occurred_at: Utc::now(),
        }
    }
}

impl fmt::Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:#}", self.source, self.error)
    }
}

/// Fire-and-forget receiver of provider failures.
///
/// Implementations must not panic and must not block the caller for long;
/// resolution continues regardless of what the sink does with the event.
pub trait ErrorSink: Send + Sync {
    fn report(&self, event: ErrorEvent);
}

/// Logs every event through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, event: ErrorEvent) {
        error!(
            source = %event.source,
            occurred_at = %event.occurred_at.to_rfc3339(),
            error = %format!("{:#}", event.error),
            "provider failure isolated"
        );
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemoryErrorSink {
    events: Mutex<Vec<ErrorEvent>>,
}

impl MemoryErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rendered `[source] error` lines for every collected event, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Sources of every collected event, oldest first.
    pub fn sources(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.iter().map(|event| event.source.clone()).collect())
            .unwrap_or_default()
    }

    /// Removes and returns every collected event.
    pub fn drain(&self) -> Vec<ErrorEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl ErrorSink for MemoryErrorSink {
    fn report(&self, event: ErrorEvent) {
        // a poisoned lock drops the event rather than panicking the caller
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Forwards every event to two sinks.
pub struct TeeErrorSink<'a> {
    first: &'a dyn ErrorSink,
    second: &'a dyn ErrorSink,
}

impl<'a> TeeErrorSink<'a> {
    pub fn new(first: &'a dyn ErrorSink, second: &'a dyn ErrorSink) -> Self {
        Self { first, second }
    }
}

impl ErrorSink for TeeErrorSink<'_> {
    fn report(&self, event: ErrorEvent) {
        let copy = ErrorEvent {
            source: event.source.clone(),
            error: anyhow::anyhow!("{:#}", event.error),
            occurred_at: event.occurred_at,
        };
        self.first.report(event);
        self.second.report(copy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn memory_sink_collects_and_drains_in_order() {
        let sink = MemoryErrorSink::new();
        sink.report(ErrorEvent::new("enum", anyhow!("module 'Missing' not found")));
        sink.report(ErrorEvent::new("dropdown", anyhow!("boom")));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.sources(), vec!["enum".to_string(), "dropdown".to_string()]);
        assert_eq!(sink.messages()[0], "[enum] module 'Missing' not found");

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn tee_sink_reports_to_both() {
        let first = MemoryErrorSink::new();
        let second = MemoryErrorSink::new();
        TeeErrorSink::new(&first, &second).report(ErrorEvent::new("enum", anyhow!("type missing")));

        assert_eq!(first.messages(), vec!["[enum] type missing".to_string()]);
        assert_eq!(second.messages(), vec!["[enum] type missing".to_string()]);
    }

    #[test]
    fn tracing_sink_does_not_panic_without_subscriber() {
        TracingErrorSink.report(ErrorEvent::new("enum", anyhow!("unavailable")));
    }
}
