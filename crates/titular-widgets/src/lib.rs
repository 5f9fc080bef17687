//! Render adapters for titular rotating headlines.
//!
//! The engine in `titular-core` produces state; this crate turns that state
//! into something drawable: [`RotatingHeadline`] maps an engine snapshot to
//! a [`HeadlineFrame`] (line text plus cursor cell) and an accessible
//! heading node with polite, whole-phrase announcements.

mod cursor;
mod headline;

pub use cursor::{blink_on, CursorFrame, CursorMotion};
pub use headline::{HeadlineFrame, RotatingHeadline};
