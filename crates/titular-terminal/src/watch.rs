//! File-backed phrase source.
//!
//! The watched file plays the role the hosted backend plays in production:
//! its contents are the raw comma-separated headline. A background thread
//! polls for changes and pushes them into a [`HeadlineStore`], so every
//! subscriber (the running app included) re-synchronizes live.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use titular_core::HeadlineStore;

/// Default interval between file polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polls a file into a [`HeadlineStore`].
#[derive(Debug)]
pub struct FileWatcher {
    path: PathBuf,
    interval: Duration,
    store: HeadlineStore,
}

impl FileWatcher {
    /// Watch `path` and publish its contents into `store`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, store: HeadlineStore) -> Self {
        Self {
            path: path.into(),
            interval: DEFAULT_POLL_INTERVAL,
            store,
        }
    }

    /// Set the poll interval.
    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start the watcher thread.
    ///
    /// The returned handle stops and joins the thread when dropped, so no
    /// poll can publish after the owner is gone.
    #[must_use]
    pub fn spawn(self) -> WatcherHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_in_thread = Arc::clone(&stop);
        let thread = thread::spawn(move || self.watch(&stop_in_thread));
        WatcherHandle {
            stop,
            thread: Some(thread),
        }
    }

    fn watch(self, stop: &AtomicBool) {
        let mut last: Option<String> = None;
        while !stop.load(Ordering::SeqCst) {
            match fs::read_to_string(&self.path) {
                Ok(contents) => {
                    let contents = contents.trim_end().to_string();
                    if last.as_deref() != Some(contents.as_str()) {
                        tracing::debug!(path = %self.path.display(), "watched file changed");
                        self.store.set(contents.clone());
                        last = Some(contents);
                    }
                }
                Err(err) => {
                    // A missing file is not fatal; keep the last value and
                    // keep watching.
                    tracing::debug!(path = %self.path.display(), %err, "watched file unreadable");
                }
            }
            self.sleep_unless_stopped(stop);
        }
    }

    fn sleep_unless_stopped(&self, stop: &AtomicBool) {
        let mut slept = Duration::ZERO;
        while slept < self.interval && !stop.load(Ordering::SeqCst) {
            let slice = (self.interval - slept).min(Duration::from_millis(50));
            thread::sleep(slice);
            slept += slice;
        }
    }
}

/// Handle to a running [`FileWatcher`] thread.
#[derive(Debug)]
pub struct WatcherHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl WatcherHandle {
    /// Stop the watcher and wait for its thread to exit. Idempotent.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
