//! Side channel for runtime failures of the dispatch loop.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::Notify;
use tracing::debug;

use crate::error::DispatchError;
use crate::format::Style;

#[derive(Debug, Error)]
pub enum Diagnostic {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Abort: unexpected {0}")]
    Read(#[from] io::Error),
}

/// Receives every per-line failure and line source error. Nothing reported
/// here reaches the caller of `start`.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Writes one line per diagnostic to stderr; the tracing copy stays at
/// debug level.
#[derive(Debug, Clone, Copy)]
pub struct StderrSink {
    style: Style,
}

impl StderrSink {
    pub fn new(style: Style) -> Self {
        Self { style }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new(Style::plain())
    }
}

impl DiagnosticSink for StderrSink {
    fn report(&self, diagnostic: Diagnostic) {
        let message = diagnostic.to_string();
        debug!(log_type = "console", "{}", message);

        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{}", self.style.error(&message));
    }
}

/// Keeps diagnostics in memory, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<String>>>,
    notify: Arc<Notify>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }

    /// Waits until at least `count` diagnostics have been reported.
    pub async fn wait_for(&self, count: usize) {
        loop {
            let notified = self.notify.notified();
            if self.len() >= count {
                return;
            }
            notified.await;
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        self.messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic.to_string());
        self.notify.notify_waiters();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Counts events at warn level or above.
    #[derive(Clone, Default)]
    struct LoudEvents(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for LoudEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() <= Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_stderr_sink_reports_once() {
        let loud = LoudEvents::default();
        let subscriber = tracing_subscriber::registry().with(loud.clone());

        tracing::subscriber::with_default(subscriber, || {
            StderrSink::default().report(Diagnostic::Dispatch(DispatchError::UnknownCommand {
                name: "bogus".to_string(),
                help: Some("h".to_string()),
            }));
        });

        assert_eq!(loud.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        let shared = sink.clone();

        let waiter = tokio::spawn(async move { shared.wait_for(2).await });

        sink.report(Diagnostic::Dispatch(DispatchError::UnknownCommand {
            name: "bogus".to_string(),
            help: None,
        }));
        sink.report(Diagnostic::Read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream closed",
        )));

        waiter.await.unwrap();
        assert_eq!(sink.len(), 2);
        assert!(sink.contains("unknown command"));
        assert_eq!(sink.messages()[1], "Abort: unexpected stream closed");
    }
}
