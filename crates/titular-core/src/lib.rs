//! Core engine for typewriter-style rotating headlines.
//!
//! This crate provides the pieces a rotating headline is built from:
//! - Phrase parsing: [`PhraseList`]
//! - The animation state machine: [`Typewriter`] with [`SpeedConfig`]
//! - Live data sources: [`PhraseSource`], [`HeadlineStore`], [`Subscription`]
//! - Assistive-technology metadata: [`AccessibleHeadline`], [`Announcer`]
//!
//! The engine owns no timers. Each step reports how long to wait before the
//! next one ([`Typewriter::next_delay`]); a driver sleeps that long and calls
//! [`Typewriter::tick`]. Tests drive the same API over virtual time.

mod accessibility;
mod config;
mod engine;
mod phrase;
mod rng;
mod source;

pub use accessibility::{AccessibleHeadline, Announcer, LiveRegion};
pub use config::{SpeedConfig, MIN_DELAY};
pub use engine::{Phase, Typewriter, START_DELAY_MAX, START_DELAY_MIN};
pub use phrase::{grapheme_len, grapheme_prefix, PhraseList};
pub use rng::{FixedRandom, RandomSource, ThreadRandom};
pub use source::{HeadlineStore, PhraseSource, SourceCallback, SourceError, Subscription};
