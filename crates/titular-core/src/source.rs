//! Live phrase sources: one-shot fetch plus change subscription.
//!
//! A [`PhraseSource`] supplies the raw comma-separated headline string and
//! notifies subscribers when it changes. The engine does not care how the
//! value is backed (memory, file, network); it needs "current value" and
//! "on change" with deterministic teardown.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

/// Callback invoked with each new raw phrase string.
pub type SourceCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Failure to produce the current raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// The backing value cannot be read right now.
    ///
    /// Callers recover locally by falling back to an empty phrase list;
    /// this error never propagates as a crash.
    Unavailable,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "phrase source unavailable"),
        }
    }
}

impl Error for SourceError {}

/// A live provider of the raw comma-separated phrase string.
pub trait PhraseSource {
    /// Current raw value, or `None` when the source holds nothing yet.
    fn fetch(&self) -> Result<Option<String>, SourceError>;

    /// Register `callback` for every subsequent value change.
    ///
    /// The returned [`Subscription`] is the only handle to the
    /// registration; dropping it (or calling
    /// [`Subscription::unsubscribe`]) guarantees the callback never fires
    /// again.
    fn subscribe(&self, callback: SourceCallback) -> Subscription;
}

type SubscriberId = u64;

struct SubscriberEntry {
    id: SubscriberId,
    callback: SourceCallback,
}

type SubscriberList = RwLock<Vec<SubscriberEntry>>;

/// Handle to an active subscription.
///
/// Unsubscribing is explicit via [`Self::unsubscribe`] (idempotent, safe to
/// call on an already-torn-down handle) and implicit on drop, so a callback
/// cannot outlive the component that registered it.
pub struct Subscription {
    inner: Option<(Weak<SubscriberList>, SubscriberId)>,
}

impl Subscription {
    fn registered(list: &Arc<SubscriberList>, id: SubscriberId) -> Self {
        Self {
            inner: Some((Arc::downgrade(list), id)),
        }
    }

    /// A subscription that was never registered, for sources that cannot
    /// notify.
    #[must_use]
    pub const fn detached() -> Self {
        Self { inner: None }
    }

    /// Whether the callback is still registered with its source.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.as_ref().is_some_and(|(list, id)| {
            list.upgrade().is_some_and(|list| {
                list.read()
                    .map_or(false, |subs| subs.iter().any(|entry| entry.id == *id))
            })
        })
    }

    /// Remove the callback from its source. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some((list, id)) = self.inner.take() {
            if let Some(list) = list.upgrade() {
                if let Ok(mut subs) = list.write() {
                    subs.retain(|entry| entry.id != id);
                }
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Shared in-memory headline value with change broadcast.
///
/// The Rust-side stand-in for a hosted single-text-column backend: clones
/// share one value, any clone may [`set`](Self::set), and every live
/// subscriber observes each update. Subscribers are invoked on the thread
/// that calls `set`; a callback must not subscribe to or unsubscribe from
/// the store it is observing.
#[derive(Clone, Default)]
pub struct HeadlineStore {
    value: Arc<RwLock<Option<String>>>,
    subscribers: Arc<SubscriberList>,
    next_id: Arc<AtomicU64>,
}

impl HeadlineStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an initial value (no broadcast).
    #[must_use]
    pub fn with_value(raw: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut slot) = store.value.write() {
            *slot = Some(raw.into());
        }
        store
    }

    /// Replace the value and broadcast it to all live subscribers.
    pub fn set(&self, raw: impl Into<String>) {
        let raw = raw.into();
        if let Ok(mut slot) = self.value.write() {
            *slot = Some(raw.clone());
        }
        if let Ok(subs) = self.subscribers.read() {
            for entry in subs.iter() {
                (entry.callback)(&raw);
            }
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().map_or(0, |subs| subs.len())
    }
}

impl fmt::Debug for HeadlineStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlineStore")
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl PhraseSource for HeadlineStore {
    fn fetch(&self) -> Result<Option<String>, SourceError> {
        self.value
            .read()
            .map(|slot| slot.clone())
            .map_err(|_| SourceError::Unavailable)
    }

    fn subscribe(&self, callback: SourceCallback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut subs) = self.subscribers.write() {
            subs.push(SubscriberEntry { id, callback });
        }
        Subscription::registered(&self.subscribers, id)
    }
}
