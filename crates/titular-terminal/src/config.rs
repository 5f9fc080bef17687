//! On-disk configuration for the `titular` binary.

use crate::error::TermError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use titular_core::SpeedConfig;
use titular_widgets::RotatingHeadline;

/// TOML configuration file contents.
///
/// ```toml
/// phrases = "Engineer, Designer, Builder"
///
/// [speed]
/// typing_ms_per_char = 70
/// hold_on_typed_ms = 1200
///
/// [headline]
/// cursor = "_"
/// level = 2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Comma-separated phrases.
    pub phrases: Option<String>,
    /// Engine timing.
    pub speed: SpeedConfig,
    /// Headline presentation.
    pub headline: HeadlineConfig,
}

impl FileConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, TermError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

/// Presentation options for the headline widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlineConfig {
    /// Heading level reported to assistive technology (1-6).
    pub level: u8,
    /// Cursor glyph.
    pub cursor: char,
    /// Cursor blink half-period in milliseconds.
    pub blink_ms: u64,
}

impl Default for HeadlineConfig {
    fn default() -> Self {
        Self {
            level: 1,
            cursor: '|',
            blink_ms: 500,
        }
    }
}

impl HeadlineConfig {
    /// Build the widget this configuration describes.
    #[must_use]
    pub fn widget(&self) -> RotatingHeadline {
        RotatingHeadline::new()
            .level(self.level)
            .cursor_glyph(self.cursor)
            .blink_interval(Duration::from_millis(self.blink_ms))
    }
}
