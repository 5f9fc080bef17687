//! Rotating headline render adapter.

use crate::cursor::{blink_on, CursorFrame, CursorMotion};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use titular_core::{AccessibleHeadline, Announcer, Phase, Typewriter};

const DEFAULT_BLINK: Duration = Duration::from_millis(500);

/// Maps typewriter engine state to a drawable headline.
///
/// The widget never owns the engine; the caller passes a snapshot each
/// frame. Before the engine starts, the frame shows the full starting
/// phrase with the waiting cursor, so the first paint is never blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotatingHeadline {
    /// Heading level reported to assistive technology (1-6).
    level: u8,
    /// Cursor glyph.
    cursor_glyph: char,
    /// Lit/dark half-period of the running cursor pulse.
    blink_interval: Duration,
    /// Whole-phrase announcement batching.
    #[serde(default)]
    announcer: Announcer,
}

impl RotatingHeadline {
    /// Create a headline widget with default cursor and level 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: 1,
            cursor_glyph: '|',
            blink_interval: DEFAULT_BLINK,
            announcer: Announcer::default(),
        }
    }

    /// Set the heading level (clamped to 1..=6).
    #[must_use]
    pub fn level(mut self, level: u8) -> Self {
        self.level = level.clamp(1, 6);
        self
    }

    /// Set the cursor glyph.
    #[must_use]
    pub const fn cursor_glyph(mut self, glyph: char) -> Self {
        self.cursor_glyph = glyph;
        self
    }

    /// Set the cursor blink half-period.
    #[must_use]
    pub const fn blink_interval(mut self, interval: Duration) -> Self {
        self.blink_interval = interval;
        self
    }

    /// Set the minimum gap between announcements.
    #[must_use]
    pub fn announce_gap(mut self, gap: Duration) -> Self {
        self.announcer = Announcer::new(gap);
        self
    }

    /// Render one instant of the headline.
    #[must_use]
    pub fn frame(&self, engine: &Typewriter, elapsed: Duration) -> HeadlineFrame {
        let motion = if engine.started() {
            CursorMotion::Running
        } else {
            CursorMotion::Waiting
        };
        let visible = match motion {
            CursorMotion::Waiting => true,
            CursorMotion::Running => blink_on(elapsed, self.blink_interval),
        };

        HeadlineFrame {
            text: engine.visible_text().to_string(),
            cursor: CursorFrame {
                glyph: self.cursor_glyph,
                motion,
                visible,
            },
        }
    }

    /// Offer the current state for announcement.
    ///
    /// Only complete phrases are announced: the pre-start fallback line, and
    /// each phrase the moment it finishes typing. Partial text is never
    /// offered, so assistive technology hears whole phrases, not keystrokes.
    pub fn poll_announcement(
        &mut self,
        engine: &Typewriter,
        elapsed: Duration,
    ) -> Option<String> {
        let candidate = if engine.started() {
            match engine.phase() {
                Phase::HoldingFull => Some(engine.current_phrase()),
                _ => None,
            }
        } else {
            Some(engine.visible_text())
        };

        let text = candidate?;
        self.announcer.offer(text, elapsed).map(ToString::to_string)
    }

    /// Accessible node for the headline container.
    #[must_use]
    pub fn accessible(&self) -> AccessibleHeadline {
        AccessibleHeadline::heading(self.level).with_announced(self.announcer.last())
    }
}

impl Default for RotatingHeadline {
    fn default() -> Self {
        Self::new()
    }
}

/// One rendered instant of the headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineFrame {
    /// Line text: the animated prefix, or the starting phrase before start.
    pub text: String,
    /// Cursor state this instant.
    pub cursor: CursorFrame,
}

impl HeadlineFrame {
    /// The frame as one drawable line: text plus the cursor cell.
    ///
    /// The cursor cell is a space while the glyph is dark, so the line width
    /// stays stable across blinks.
    #[must_use]
    pub fn line(&self) -> String {
        let mut line = self.text.clone();
        line.push(if self.cursor.visible {
            self.cursor.glyph
        } else {
            ' '
        });
        line
    }
}
