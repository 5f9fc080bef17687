//! Scripted phrase source for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use titular_core::{HeadlineStore, PhraseSource, SourceCallback, SourceError, Subscription};

/// A phrase source a test controls by hand.
///
/// Wraps a [`HeadlineStore`] so subscription semantics are the production
/// ones, and adds a switch to make `fetch` fail for source-unavailable
/// scenarios.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    store: HeadlineStore,
    unavailable: Arc<AtomicBool>,
}

impl ScriptedSource {
    /// An empty scripted source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scripted source holding an initial value.
    #[must_use]
    pub fn with_value(raw: &str) -> Self {
        Self {
            store: HeadlineStore::with_value(raw),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Emit a new raw value to all subscribers.
    pub fn emit(&self, raw: &str) {
        self.store.set(raw);
    }

    /// Make subsequent `fetch` calls fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.store.subscriber_count()
    }
}

impl PhraseSource for ScriptedSource {
    fn fetch(&self) -> Result<Option<String>, SourceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable);
        }
        self.store.fetch()
    }

    fn subscribe(&self, callback: SourceCallback) -> Subscription {
        self.store.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_fetch_initial_value() {
        let source = ScriptedSource::with_value("A, B");
        assert_eq!(source.fetch(), Ok(Some("A, B".to_string())));
    }

    #[test]
    fn test_fetch_empty() {
        let source = ScriptedSource::new();
        assert_eq!(source.fetch(), Ok(None));
    }

    #[test]
    fn test_unavailable_fetch_fails_then_recovers() {
        let source = ScriptedSource::with_value("A");
        source.set_unavailable(true);
        assert_eq!(source.fetch(), Err(SourceError::Unavailable));
        source.set_unavailable(false);
        assert_eq!(source.fetch(), Ok(Some("A".to_string())));
    }

    #[test]
    fn test_emit_reaches_subscribers() {
        let source = ScriptedSource::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_cb = Arc::clone(&seen);
        let _sub = source.subscribe(Box::new(move |raw| {
            if let Ok(mut log) = seen_in_cb.lock() {
                log.push(raw.to_string());
            }
        }));
        source.emit("one");
        source.emit("two");
        let log = seen.lock().expect("log readable");
        assert_eq!(*log, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_dropped_subscription_stops_emission() {
        let source = ScriptedSource::new();
        {
            let _sub = source.subscribe(Box::new(|_| {}));
            assert_eq!(source.subscriber_count(), 1);
        }
        assert_eq!(source.subscriber_count(), 0);
    }
}
