//! Testing harness for titular engines.
//!
//! Engines report their own schedule, so tests never sleep: the [`Harness`]
//! advances virtual time and applies due ticks in order, and the
//! [`ScriptedSource`] replays source updates and failures on demand.

mod harness;
mod script;

pub use harness::Harness;
pub use script::ScriptedSource;
