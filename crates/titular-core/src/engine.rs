//! The typewriter state machine.
//!
//! A [`Typewriter`] animates one phrase at a time: type it grapheme by
//! grapheme, hold, delete it, hold, advance to the next phrase, loop. The
//! engine owns no timers; it reports the delay until its next step via
//! [`Typewriter::next_delay`] and the driver calls [`Typewriter::tick`] when
//! that delay has elapsed. Exactly one step is pending at any time.

use crate::config::SpeedConfig;
use crate::phrase::{grapheme_len, grapheme_prefix, PhraseList};
use crate::rng::{RandomSource, ThreadRandom};
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// Lower bound of the random startup delay.
pub const START_DELAY_MIN: Duration = Duration::from_millis(500);

/// Upper bound (exclusive) of the random startup delay.
///
/// Staggering startup keeps several headlines on one screen from animating
/// in lockstep.
pub const START_DELAY_MAX: Duration = Duration::from_millis(1500);

/// What the engine is currently doing to the displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Appending one grapheme per tick.
    Typing,
    /// Fully typed, holding before deletion begins.
    HoldingFull,
    /// Removing one grapheme per tick.
    Deleting,
    /// Fully deleted, holding before the next phrase types.
    HoldingEmpty,
}

/// Typewriter animation engine over a [`PhraseList`].
///
/// State is instance-local and single-threaded. Dropping the engine is
/// teardown: no step can run afterwards because nothing else holds it.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: PhraseList,
    /// New list awaiting adoption at the next `HoldingEmpty -> Typing`
    /// boundary, so an in-flight phase finishes against the text it started
    /// with.
    pending_phrases: Option<PhraseList>,
    config: SpeedConfig,
    phrase_index: usize,
    /// Graphemes of the current phrase on display.
    shown: usize,
    displayed: String,
    phase: Phase,
    started: bool,
    next_delay: Option<Duration>,
}

impl Typewriter {
    /// Create an engine from a raw comma-separated string.
    ///
    /// With more than one phrase the starting index is random, and the first
    /// step fires after a random delay between [`START_DELAY_MIN`] and
    /// [`START_DELAY_MAX`].
    #[must_use]
    pub fn new(raw: &str, config: SpeedConfig) -> Self {
        Self::with_rng(raw, config, &mut ThreadRandom)
    }

    /// Create an engine drawing its startup randomness from `rng`.
    #[must_use]
    pub fn with_rng(raw: &str, config: SpeedConfig, rng: &mut dyn RandomSource) -> Self {
        let phrases = PhraseList::parse(raw);
        let phrase_index = if phrases.len() > 1 {
            rng.pick_index(phrases.len())
        } else {
            0
        };
        let start_delay = rng.pick_delay(START_DELAY_MIN, START_DELAY_MAX);

        Self {
            phrases,
            pending_phrases: None,
            config,
            phrase_index,
            shown: 0,
            displayed: String::new(),
            phase: Phase::Typing,
            started: false,
            next_delay: Some(start_delay),
        }
    }

    /// Whether the animation has begun.
    #[must_use]
    pub fn started(&self) -> bool {
        self.started
    }

    /// Current phase of the state machine.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the phrase currently animating (or queued to type next).
    #[must_use]
    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    /// The animated text: a grapheme prefix of the current phrase.
    ///
    /// Empty until the engine starts; see [`Self::visible_text`] for the
    /// render-layer contract.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.displayed
    }

    /// Text the render layer should show.
    ///
    /// Before startup this is the full starting phrase, so the first paint
    /// is never blank; afterwards it is the animated prefix.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        if self.started {
            &self.displayed
        } else {
            self.current_phrase()
        }
    }

    /// The phrase the engine is currently working against.
    #[must_use]
    pub fn current_phrase(&self) -> &str {
        self.phrases.get(self.phrase_index).unwrap_or("")
    }

    /// The phrase list in effect (pending updates excluded until adopted).
    #[must_use]
    pub fn phrases(&self) -> &PhraseList {
        &self.phrases
    }

    /// Speed configuration.
    #[must_use]
    pub fn config(&self) -> &SpeedConfig {
        &self.config
    }

    /// Delay until the next scheduled step, or `None` once the engine is
    /// terminal (non-looping and finished its last phrase).
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        self.next_delay
    }

    /// Whether the engine has gone terminal and will never tick again.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next_delay.is_none()
    }

    /// Apply the step that [`Self::next_delay`] scheduled.
    ///
    /// Calling this on a terminal engine is a no-op; a late tick from a
    /// sloppy driver must never revive the animation.
    pub fn tick(&mut self) {
        if self.next_delay.is_none() {
            return;
        }

        if !self.started {
            self.started = true;
            self.enter_typing();
            return;
        }

        match self.phase {
            Phase::Typing => self.tick_typing(),
            Phase::HoldingFull => {
                self.phase = Phase::Deleting;
                self.next_delay = Some(self.config.deleting_delay());
            }
            Phase::Deleting => self.tick_deleting(),
            Phase::HoldingEmpty => self.enter_typing(),
        }
    }

    /// Replace the phrase list from a new raw string.
    ///
    /// The update is an interrupt from the phrase source, applied between
    /// steps. The current phase finishes against the old text; the new list
    /// takes effect at the next `HoldingEmpty -> Typing` boundary, with the
    /// phrase index preserved when still in range and clamped to 0
    /// otherwise. Before startup the list is adopted immediately. A terminal
    /// engine ignores updates: one pass means one pass.
    pub fn update_phrases(&mut self, raw: &str) {
        if self.is_finished() {
            return;
        }

        let list = PhraseList::parse(raw);
        if self.started {
            self.pending_phrases = Some(list);
        } else {
            if self.phrase_index >= list.len() {
                self.phrase_index = 0;
            }
            self.phrases = list;
            self.pending_phrases = None;
        }
    }

    fn enter_typing(&mut self) {
        if let Some(list) = self.pending_phrases.take() {
            if self.phrase_index >= list.len() {
                self.phrase_index = 0;
            }
            self.phrases = list;
        }
        self.phase = Phase::Typing;
        self.shown = 0;
        self.displayed.clear();
        self.next_delay = Some(self.config.typing_delay());
    }

    fn tick_typing(&mut self) {
        let target = self.phrases.get(self.phrase_index).unwrap_or("");
        let total = grapheme_len(target);

        if self.shown < total {
            self.shown += 1;
            let prefix = grapheme_prefix(target, self.shown);
            self.displayed.clear();
            self.displayed.push_str(prefix);
        }

        if self.shown >= total {
            self.phase = Phase::HoldingFull;
            self.next_delay = Some(self.config.hold_on_typed());
        } else {
            self.next_delay = Some(self.config.typing_delay());
        }
    }

    fn tick_deleting(&mut self) {
        if self.shown > 0 {
            self.shown -= 1;
            let boundary = self
                .displayed
                .grapheme_indices(true)
                .last()
                .map_or(0, |(offset, _)| offset);
            self.displayed.truncate(boundary);
        }

        if self.shown == 0 {
            self.enter_holding_empty();
        } else {
            self.next_delay = Some(self.config.deleting_delay());
        }
    }

    fn enter_holding_empty(&mut self) {
        self.phase = Phase::HoldingEmpty;
        let len = self.phrases.len();
        let next = (self.phrase_index + 1) % len;

        // Index advances on entry, not after the hold. Without looping,
        // wrapping off the last phrase parks the engine instead.
        if !self.config.looping && next == 0 && self.phrase_index == len - 1 {
            self.next_delay = None;
        } else {
            self.phrase_index = next;
            self.next_delay = Some(self.config.hold_on_deleted());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedRandom;

    fn fast_config() -> SpeedConfig {
        SpeedConfig {
            typing_ms_per_char: 10,
            deleting_ms_per_char: 10,
            hold_on_typed_ms: 20,
            hold_on_deleted_ms: 20,
            looping: true,
        }
    }

    fn engine(raw: &str, config: SpeedConfig) -> Typewriter {
        Typewriter::with_rng(raw, config, &mut FixedRandom::default())
    }

    /// Tick until the engine reaches `phase`, up to `max_steps` ticks.
    fn tick_until_phase(tw: &mut Typewriter, phase: Phase, max_steps: usize) {
        for _ in 0..max_steps {
            if tw.started() && tw.phase() == phase {
                return;
            }
            tw.tick();
        }
        panic!("engine never reached {phase:?}");
    }

    #[test]
    fn test_not_started_until_first_tick() {
        let tw = engine("Hi", fast_config());
        assert!(!tw.started());
        assert_eq!(tw.text(), "");
        assert_eq!(tw.visible_text(), "Hi");
        assert_eq!(tw.next_delay(), Some(Duration::ZERO));
    }

    #[test]
    fn test_first_tick_starts_typing() {
        let mut tw = engine("Hi", fast_config());
        tw.tick();
        assert!(tw.started());
        assert_eq!(tw.phase(), Phase::Typing);
        assert_eq!(tw.text(), "");
        assert_eq!(tw.next_delay(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn test_typing_appends_one_grapheme_per_tick() {
        let mut tw = engine("Hi", fast_config());
        tw.tick(); // start
        tw.tick();
        assert_eq!(tw.text(), "H");
        tw.tick();
        assert_eq!(tw.text(), "Hi");
        assert_eq!(tw.phase(), Phase::HoldingFull);
    }

    #[test]
    fn test_typing_monotonic_prefixes() {
        let mut tw = engine("Engineer", fast_config());
        tw.tick(); // start
        let target = "Engineer";
        let mut previous = String::new();
        while tw.phase() == Phase::Typing {
            tw.tick();
            let current = tw.text().to_string();
            assert!(target.starts_with(&current));
            assert_eq!(grapheme_len(&current), grapheme_len(&previous) + 1);
            previous = current;
        }
        assert_eq!(previous, target);
    }

    #[test]
    fn test_hold_full_then_deleting() {
        let mut tw = engine("Hi", fast_config());
        tw.tick(); // start
        tw.tick();
        tw.tick(); // "Hi" typed
        assert_eq!(tw.phase(), Phase::HoldingFull);
        assert_eq!(tw.next_delay(), Some(Duration::from_millis(20)));
        tw.tick();
        assert_eq!(tw.phase(), Phase::Deleting);
        assert_eq!(tw.text(), "Hi");
    }

    #[test]
    fn test_deleting_removes_last_grapheme_per_tick() {
        let mut tw = engine("Hi", fast_config());
        tick_until_phase(&mut tw, Phase::Deleting, 16);
        tw.tick();
        assert_eq!(tw.text(), "H");
        tw.tick();
        assert_eq!(tw.text(), "");
        assert_eq!(tw.phase(), Phase::HoldingEmpty);
    }

    #[test]
    fn test_cycle_advances_index_on_holding_empty_entry() {
        let mut tw = engine("Hi, Bye", fast_config());
        assert_eq!(tw.phrase_index(), 0);
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 32);
        // Advanced immediately on entry, before the hold elapses.
        assert_eq!(tw.phrase_index(), 1);
        assert_eq!(tw.text(), "");
    }

    #[test]
    fn test_cycle_wraps_modulo_length() {
        let mut tw = engine("Hi, Bye", fast_config());
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 32);
        assert_eq!(tw.phrase_index(), 1);
        tw.tick(); // hold elapses, typing "Bye"
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 32);
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn test_random_start_index_used() {
        let mut rng = FixedRandom {
            index: 1,
            delay: Duration::ZERO,
        };
        let tw = Typewriter::with_rng("Hi, Bye", fast_config(), &mut rng);
        assert_eq!(tw.phrase_index(), 1);
        assert_eq!(tw.visible_text(), "Bye");
    }

    #[test]
    fn test_single_phrase_skips_random_index() {
        let mut rng = FixedRandom {
            index: 5,
            delay: Duration::from_millis(700),
        };
        let tw = Typewriter::with_rng("Solo", fast_config(), &mut rng);
        assert_eq!(tw.phrase_index(), 0);
        assert_eq!(tw.next_delay(), Some(Duration::from_millis(700)));
    }

    #[test]
    fn test_single_phrase_cycles_forever() {
        let mut tw = engine("Solo", fast_config());
        tw.tick(); // start
        for _ in 0..3 {
            tick_until_phase(&mut tw, Phase::HoldingEmpty, 32);
            assert_eq!(tw.phrase_index(), 0);
            assert!(!tw.is_finished());
            tw.tick();
            assert_eq!(tw.phase(), Phase::Typing);
        }
    }

    #[test]
    fn test_empty_placeholder_phrase_cycles() {
        let mut tw = engine("", fast_config());
        tw.tick(); // start
        assert_eq!(tw.phase(), Phase::Typing);
        tw.tick(); // nothing to type
        assert_eq!(tw.phase(), Phase::HoldingFull);
        assert_eq!(tw.text(), "");
        tw.tick();
        assert_eq!(tw.phase(), Phase::Deleting);
        tw.tick(); // nothing to delete
        assert_eq!(tw.phase(), Phase::HoldingEmpty);
        assert!(!tw.is_finished());
    }

    #[test]
    fn test_no_loop_goes_terminal_after_last_phrase() {
        let config = SpeedConfig {
            looping: false,
            ..fast_config()
        };
        let mut rng = FixedRandom {
            index: 1,
            delay: Duration::ZERO,
        };
        let mut tw = Typewriter::with_rng("Hi, Bye", config, &mut rng);
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 32);
        assert!(tw.is_finished());
        assert_eq!(tw.next_delay(), None);
        assert_eq!(tw.phrase_index(), 1); // unchanged, no wrap
        assert_eq!(tw.text(), "");
    }

    #[test]
    fn test_no_loop_mid_list_still_advances() {
        let config = SpeedConfig {
            looping: false,
            ..fast_config()
        };
        let mut tw = engine("Hi, Bye", config);
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 32);
        assert_eq!(tw.phrase_index(), 1);
        assert!(!tw.is_finished());
    }

    #[test]
    fn test_terminal_tick_is_noop() {
        let config = SpeedConfig {
            looping: false,
            ..fast_config()
        };
        let mut tw = engine("X", config);
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 16);
        assert!(tw.is_finished());
        let before = tw.clone();
        tw.tick();
        tw.tick();
        assert_eq!(tw.text(), before.text());
        assert_eq!(tw.phase(), before.phase());
        assert_eq!(tw.phrase_index(), before.phrase_index());
        assert!(tw.is_finished());
    }

    #[test]
    fn test_update_before_start_adopts_immediately() {
        let mut rng = FixedRandom {
            index: 0,
            delay: Duration::from_millis(800),
        };
        let mut tw = Typewriter::with_rng("Old", fast_config(), &mut rng);
        tw.update_phrases("New, Newer");
        assert_eq!(tw.visible_text(), "New");
        tw.tick();
        tw.tick();
        assert_eq!(tw.text(), "N");
    }

    #[test]
    fn test_update_mid_typing_finishes_old_phrase_first() {
        let mut tw = engine("Old", fast_config());
        tw.tick(); // start
        tw.tick();
        assert_eq!(tw.text(), "O");
        tw.update_phrases("New");
        // Old phrase keeps animating through its cycle.
        tick_until_phase(&mut tw, Phase::HoldingFull, 16);
        assert_eq!(tw.text(), "Old");
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 16);
        tw.tick(); // adoption at the Typing boundary
        assert_eq!(tw.phase(), Phase::Typing);
        tw.tick();
        assert_eq!(tw.text(), "N");
    }

    #[test]
    fn test_update_clamps_out_of_range_index() {
        let mut tw = engine("a, b, c", fast_config());
        assert_eq!(tw.phrase_index(), 0);
        tw.tick(); // start
        tw.update_phrases("x"); // one phrase
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 16);
        // Entry advanced 0 -> 1 against the old list; 1 is out of range for
        // the new single-phrase list, so adoption clamps to 0.
        assert_eq!(tw.phrase_index(), 1);
        tw.tick(); // adopt
        assert_eq!(tw.phrase_index(), 0);
        tw.tick();
        assert_eq!(tw.text(), "x");
    }

    #[test]
    fn test_update_preserves_in_range_index() {
        let mut rng = FixedRandom {
            index: 1,
            delay: Duration::ZERO,
        };
        let mut tw = Typewriter::with_rng("a, b", fast_config(), &mut rng);
        tw.tick(); // start, typing "b" (index 1)
        tw.update_phrases("x, y, z");
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 16);
        // Entry advanced 1 -> 0 against the old two-phrase list.
        assert_eq!(tw.phrase_index(), 0);
        tw.tick(); // adopt: 0 is in range for the new list
        tw.tick();
        assert_eq!(tw.text(), "x");
    }

    #[test]
    fn test_update_after_terminal_is_ignored() {
        let config = SpeedConfig {
            looping: false,
            ..fast_config()
        };
        let mut tw = engine("X", config);
        tick_until_phase(&mut tw, Phase::HoldingEmpty, 16);
        assert!(tw.is_finished());
        tw.update_phrases("revived?");
        assert!(tw.is_finished());
        tw.tick();
        assert_eq!(tw.text(), "");
    }

    #[test]
    fn test_multibyte_phrase_types_by_grapheme() {
        let mut tw = engine("日本語", fast_config());
        tw.tick(); // start
        tw.tick();
        assert_eq!(tw.text(), "日");
        tw.tick();
        assert_eq!(tw.text(), "日本");
        tw.tick();
        assert_eq!(tw.text(), "日本語");
        assert_eq!(tw.phase(), Phase::HoldingFull);
        tw.tick(); // -> Deleting
        tw.tick();
        assert_eq!(tw.text(), "日本");
    }

    #[test]
    fn test_zero_durations_still_schedule_min_delay() {
        let config = SpeedConfig {
            typing_ms_per_char: 0,
            deleting_ms_per_char: 0,
            hold_on_typed_ms: 0,
            hold_on_deleted_ms: 0,
            looping: true,
        };
        let mut tw = engine("Hi", config);
        tw.tick(); // start
        assert_eq!(tw.next_delay(), Some(crate::config::MIN_DELAY));
        tw.tick();
        assert_eq!(tw.next_delay(), Some(crate::config::MIN_DELAY));
    }

    #[test]
    fn test_independent_instances() {
        let mut a = engine("Hi", fast_config());
        let b = engine("Hi", fast_config());
        a.tick();
        a.tick();
        assert_eq!(a.text(), "H");
        assert_eq!(b.text(), "");
        assert!(!b.started());
    }
}
