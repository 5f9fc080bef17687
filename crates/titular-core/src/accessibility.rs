//! Assistive-technology metadata for the rotating headline.
//!
//! A headline that rewrites itself several times a second would be
//! unbearable read character by character. The widget layer announces
//! politely, as a whole line, and only when a phrase completes; the
//! [`Announcer`] enforces that batching.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Live-region announcement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveRegion {
    /// No live announcements.
    #[default]
    Off,
    /// Announce when the user is idle.
    Polite,
    /// Announce immediately.
    Assertive,
}

/// Accessible view of a headline widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibleHeadline {
    /// Heading level, 1-6.
    pub level: u8,
    /// Live-region mode for text updates.
    pub live: LiveRegion,
    /// Whether updates are announced as a whole line.
    pub atomic: bool,
    /// Text assistive technology should read.
    pub announced: String,
}

impl AccessibleHeadline {
    /// A polite, atomic heading node at `level` (clamped to 1..=6).
    #[must_use]
    pub fn heading(level: u8) -> Self {
        Self {
            level: level.clamp(1, 6),
            live: LiveRegion::Polite,
            atomic: true,
            announced: String::new(),
        }
    }

    /// Set the announced text.
    #[must_use]
    pub fn with_announced(mut self, text: impl Into<String>) -> Self {
        self.announced = text.into();
        self
    }
}

/// Batches text updates so assistive technology hears whole phrases.
///
/// An offer is accepted only when the text differs from the last accepted
/// announcement and the minimum gap has elapsed since it.
///
/// Only the gap is configuration; serialization carries it and leaves the
/// runtime state behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcer {
    min_gap: Duration,
    #[serde(skip)]
    last_at: Option<Duration>,
    #[serde(skip)]
    last_text: String,
}

impl Announcer {
    /// Create an announcer with the given minimum gap between
    /// announcements.
    #[must_use]
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_at: None,
            last_text: String::new(),
        }
    }

    /// Offer `text` at `elapsed` time since mount.
    ///
    /// Returns the text to announce when accepted, `None` when suppressed.
    pub fn offer(&mut self, text: &str, elapsed: Duration) -> Option<&str> {
        if text == self.last_text {
            return None;
        }
        if let Some(at) = self.last_at {
            if elapsed.saturating_sub(at) < self.min_gap {
                return None;
            }
        }
        self.last_text.clear();
        self.last_text.push_str(text);
        self.last_at = Some(elapsed);
        Some(&self.last_text)
    }

    /// The last accepted announcement.
    #[must_use]
    pub fn last(&self) -> &str {
        &self.last_text
    }
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}
