//! Speed configuration for the typewriter engine.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum scheduled delay.
///
/// Zero durations in the configuration clamp here so a misconfigured engine
/// still moves forward one step per millisecond instead of busy-spinning.
pub const MIN_DELAY: Duration = Duration::from_millis(1);

/// Animation timing for a [`Typewriter`](crate::Typewriter).
///
/// Every field is independently defaultable; unknown durations cannot be
/// negative (`u64` milliseconds) and zero clamps to [`MIN_DELAY`] at the
/// accessor level, so no configuration value is ever an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Milliseconds between typed graphemes.
    pub typing_ms_per_char: u64,
    /// Milliseconds between deleted graphemes.
    pub deleting_ms_per_char: u64,
    /// Milliseconds a fully typed phrase holds before deletion begins.
    pub hold_on_typed_ms: u64,
    /// Milliseconds the empty line holds before the next phrase types.
    pub hold_on_deleted_ms: u64,
    /// Wrap from the last phrase back to the first.
    pub looping: bool,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            typing_ms_per_char: 70,
            deleting_ms_per_char: 40,
            hold_on_typed_ms: 1200,
            hold_on_deleted_ms: 300,
            looping: true,
        }
    }
}

impl SpeedConfig {
    /// Delay before each typed grapheme.
    #[must_use]
    pub const fn typing_delay(&self) -> Duration {
        clamp_ms(self.typing_ms_per_char)
    }

    /// Delay before each deleted grapheme.
    #[must_use]
    pub const fn deleting_delay(&self) -> Duration {
        clamp_ms(self.deleting_ms_per_char)
    }

    /// Hold after a phrase is fully typed.
    #[must_use]
    pub const fn hold_on_typed(&self) -> Duration {
        clamp_ms(self.hold_on_typed_ms)
    }

    /// Hold after a phrase is fully deleted.
    #[must_use]
    pub const fn hold_on_deleted(&self) -> Duration {
        clamp_ms(self.hold_on_deleted_ms)
    }
}

const fn clamp_ms(ms: u64) -> Duration {
    if ms == 0 {
        MIN_DELAY
    } else {
        Duration::from_millis(ms)
    }
}
