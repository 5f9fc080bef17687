//! The headline run loop.

use crate::backend::TerminalBackend;
use crate::error::TermError;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyModifiers};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use titular_core::{
    PhraseSource, RandomSource, SpeedConfig, Subscription, ThreadRandom, Typewriter,
};
use titular_widgets::RotatingHeadline;
use unicode_width::UnicodeWidthChar;

/// Redraw cadence while waiting between engine steps, so the cursor pulse
/// stays smooth.
const BLINK_SLICE: Duration = Duration::from_millis(120);

/// Poll cadence once a non-looping engine has gone terminal.
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Terminal headline application.
///
/// Owns the engine, the widget, and the source subscription; dropping the
/// app is teardown for all three. Source callbacks forward raw strings into
/// a channel drained between ticks, so the engine itself stays
/// single-threaded.
pub struct App<B: TerminalBackend> {
    backend: B,
    engine: Typewriter,
    headline: RotatingHeadline,
    updates: mpsc::Receiver<String>,
    _subscription: Subscription,
}

impl<B: TerminalBackend> App<B> {
    /// Wire an app to a phrase source.
    ///
    /// The initial value comes from a one-shot fetch; an unavailable source
    /// falls back to the empty phrase list rather than failing.
    pub fn connect(
        backend: B,
        source: &dyn PhraseSource,
        config: SpeedConfig,
        headline: RotatingHeadline,
    ) -> Self {
        Self::connect_with_rng(backend, source, config, headline, &mut ThreadRandom)
    }

    /// [`Self::connect`] with explicit startup randomness.
    pub fn connect_with_rng(
        backend: B,
        source: &dyn PhraseSource,
        config: SpeedConfig,
        headline: RotatingHeadline,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let raw = match source.fetch() {
            Ok(Some(raw)) => raw,
            Ok(None) => String::new(),
            Err(err) => {
                tracing::warn!(%err, "phrase source unavailable, starting empty");
                String::new()
            }
        };
        let engine = Typewriter::with_rng(&raw, config, rng);

        let (tx, rx) = mpsc::channel();
        let subscription = source.subscribe(Box::new(move |raw| {
            let _ = tx.send(raw.to_owned());
        }));

        Self {
            backend,
            engine,
            headline,
            updates: rx,
            _subscription: subscription,
        }
    }

    /// The engine driving this app.
    #[must_use]
    pub fn engine(&self) -> &Typewriter {
        &self.engine
    }

    /// The backend, e.g. to inspect a [`TestableBackend`](crate::TestableBackend).
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run until the user quits (`q`, `Esc`, or `Ctrl-C`).
    ///
    /// The terminal is restored on every exit path, including errors from
    /// the loop body.
    pub fn run(&mut self) -> Result<(), TermError> {
        self.backend.enter()?;
        tracing::info!("headline animation running");
        let result = self.event_loop();
        if let Err(err) = self.backend.leave() {
            tracing::warn!(%err, "terminal restore failed");
        }
        result
    }

    fn event_loop(&mut self) -> Result<(), TermError> {
        let origin = Instant::now();
        let mut deadline = self.engine.next_delay().map(|delay| origin + delay);

        loop {
            // Source updates are interrupts, applied between steps.
            while let Ok(raw) = self.updates.try_recv() {
                tracing::debug!(raw = %raw, "phrase source update");
                self.engine.update_phrases(&raw);
            }

            let elapsed = origin.elapsed();
            let frame = self.headline.frame(&self.engine, elapsed);
            if let Some(text) = self.headline.poll_announcement(&self.engine, elapsed) {
                tracing::debug!(%text, "announcing phrase");
            }
            let columns = self.backend.columns()?;
            self.backend
                .draw_line(&fit_line(&frame.line(), columns as usize))?;

            let wait = deadline
                .map_or(IDLE_WAIT, |due| due.saturating_duration_since(Instant::now()))
                .min(BLINK_SLICE);
            if self.backend.poll(wait)? {
                let event = self.backend.read_event()?;
                if is_quit(&event) {
                    tracing::info!("quit requested");
                    return Ok(());
                }
            }

            if let Some(due) = deadline {
                if Instant::now() >= due {
                    self.engine.tick();
                    deadline = self.engine.next_delay().map(|delay| Instant::now() + delay);
                }
            }
        }
    }
}

fn is_quit(event: &CrosstermEvent) -> bool {
    match event {
        CrosstermEvent::Key(key) => {
            matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                || (key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL))
        }
        _ => false,
    }
}

/// Truncate `line` to at most `max_columns` terminal columns.
fn fit_line(line: &str, max_columns: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in line.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_columns {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}
