//! Cursor glyph state for the headline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cursor animation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorMotion {
    /// Before the animation starts: a distinct attention motion, always lit.
    Waiting,
    /// After start: a steady pulse alongside the typing.
    Running,
}

/// One rendered instant of the cursor.
///
/// The cursor is decorative; it never appears in announced text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorFrame {
    /// Glyph to draw.
    pub glyph: char,
    /// Animation mode.
    pub motion: CursorMotion,
    /// Whether the glyph is lit this instant.
    pub visible: bool,
}

/// Blink timing: a square wave with equal lit and dark halves of `interval`.
///
/// A zero interval means always lit.
#[must_use]
pub fn blink_on(elapsed: Duration, interval: Duration) -> bool {
    if interval.is_zero() {
        return true;
    }
    let interval_ms = interval.as_millis();
    (elapsed.as_millis() % (interval_ms * 2)) < interval_ms
}
