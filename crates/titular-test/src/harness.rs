//! Simulated-time driver for typewriter engines.

use std::time::Duration;
use titular_core::{FixedRandom, Phase, SpeedConfig, Typewriter};

/// Drives an engine over virtual time.
///
/// The harness plays the role of the production driver: it tracks when the
/// engine's next step is due, and [`advance`](Self::advance) applies every
/// step that comes due within the window, in order, never two at once.
/// Construction is deterministic (starting index 0, zero startup delay)
/// unless [`with_start`](Self::with_start) says otherwise.
pub struct Harness {
    engine: Typewriter,
    now: Duration,
    due_in: Option<Duration>,
    trace: Vec<String>,
}

impl Harness {
    /// Harness over a deterministic engine: start index 0, no startup delay.
    #[must_use]
    pub fn new(raw: &str, config: SpeedConfig) -> Self {
        Self::with_start(raw, config, 0, Duration::ZERO)
    }

    /// Harness with a forced starting index and startup delay.
    #[must_use]
    pub fn with_start(
        raw: &str,
        config: SpeedConfig,
        start_index: usize,
        start_delay: Duration,
    ) -> Self {
        let mut rng = FixedRandom {
            index: start_index,
            delay: start_delay,
        };
        let engine = Typewriter::with_rng(raw, config, &mut rng);
        let due_in = engine.next_delay();
        Self {
            engine,
            now: Duration::ZERO,
            due_in,
            trace: Vec::new(),
        }
    }

    /// The engine under test.
    #[must_use]
    pub fn engine(&self) -> &Typewriter {
        &self.engine
    }

    /// Mutable engine access, e.g. to deliver a source update mid-run.
    pub fn engine_mut(&mut self) -> &mut Typewriter {
        &mut self.engine
    }

    /// Virtual time elapsed since construction.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Every distinct displayed text, in the order it appeared.
    #[must_use]
    pub fn texts_seen(&self) -> &[String] {
        &self.trace
    }

    /// Advance virtual time, ticking the engine as steps come due.
    pub fn advance(&mut self, window: Duration) -> &mut Self {
        let mut remaining = window;
        loop {
            let Some(due) = self.due_in else {
                // Terminal engine: time passes, nothing happens.
                self.now += remaining;
                return self;
            };
            if due > remaining {
                self.due_in = Some(due - remaining);
                self.now += remaining;
                return self;
            }
            remaining -= due;
            self.now += due;
            self.apply_tick();
        }
    }

    /// Advance by whole milliseconds.
    pub fn advance_ms(&mut self, ms: u64) -> &mut Self {
        self.advance(Duration::from_millis(ms))
    }

    /// Jump straight to the next due step and apply it.
    pub fn step(&mut self) -> &mut Self {
        if let Some(due) = self.due_in {
            self.now += due;
            self.apply_tick();
        }
        self
    }

    /// Apply the next `count` due steps.
    pub fn step_n(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.step();
        }
        self
    }

    fn apply_tick(&mut self) {
        self.engine.tick();
        self.due_in = self.engine.next_delay();
        let text = self.engine.text();
        // The pre-animation blank is not a text anyone saw.
        if self.trace.is_empty() && text.is_empty() {
            return;
        }
        if self.trace.last().map(String::as_str) != Some(text) {
            self.trace.push(text.to_string());
        }
    }

    // === Assertions ===

    /// Assert the animated text.
    ///
    /// # Panics
    ///
    /// Panics when the text differs.
    pub fn assert_text(&self, expected: &str) -> &Self {
        let actual = self.engine.text();
        assert_eq!(
            actual, expected,
            "expected text '{expected}' but got '{actual}' at {:?}",
            self.now
        );
        self
    }

    /// Assert the engine phase.
    ///
    /// # Panics
    ///
    /// Panics when the phase differs.
    pub fn assert_phase(&self, expected: Phase) -> &Self {
        let actual = self.engine.phase();
        assert_eq!(
            actual, expected,
            "expected phase {expected:?} but got {actual:?} at {:?}",
            self.now
        );
        self
    }

    /// Assert the current phrase index.
    ///
    /// # Panics
    ///
    /// Panics when the index differs.
    pub fn assert_index(&self, expected: usize) -> &Self {
        let actual = self.engine.phrase_index();
        assert_eq!(
            actual, expected,
            "expected phrase index {expected} but got {actual} at {:?}",
            self.now
        );
        self
    }

    /// Assert the engine has started.
    ///
    /// # Panics
    ///
    /// Panics when it has not.
    pub fn assert_started(&self) -> &Self {
        assert!(self.engine.started(), "engine not started at {:?}", self.now);
        self
    }

    /// Assert the engine is terminal.
    ///
    /// # Panics
    ///
    /// Panics when further steps are still scheduled.
    pub fn assert_finished(&self) -> &Self {
        assert!(
            self.engine.is_finished(),
            "engine still scheduled at {:?}: next in {:?}",
            self.now,
            self.engine.next_delay()
        );
        self
    }
}
