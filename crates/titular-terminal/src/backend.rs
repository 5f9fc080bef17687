//! Terminal backends.
//!
//! The driver talks to the terminal through [`TerminalBackend`] so the run
//! loop can be exercised without a TTY: [`CrosstermBackend`] is the real
//! thing, [`TestableBackend`] replays scripted events and captures drawn
//! lines.

use crate::error::TermError;
use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::collections::VecDeque;
use std::io::{self, IsTerminal, Stdout, Write};
use std::time::Duration;

/// Raw terminal operations the driver needs.
pub trait TerminalBackend {
    /// Enter raw mode and hide the hardware cursor.
    fn enter(&mut self) -> Result<(), TermError>;
    /// Restore the terminal. Must be safe to call after a failed `enter`.
    fn leave(&mut self) -> Result<(), TermError>;
    /// Wait up to `timeout` for an input event.
    fn poll(&mut self, timeout: Duration) -> Result<bool, TermError>;
    /// Read the next input event.
    fn read_event(&mut self) -> Result<CrosstermEvent, TermError>;
    /// Redraw the headline line in place.
    fn draw_line(&mut self, line: &str) -> Result<(), TermError>;
    /// Current terminal width in columns.
    fn columns(&mut self) -> Result<u16, TermError>;
}

/// Real crossterm backend over stdout.
pub struct CrosstermBackend {
    stdout: Stdout,
}

impl CrosstermBackend {
    /// Create a backend over the process stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<(), TermError> {
        if !self.stdout.is_terminal() {
            return Err(TermError::TerminalNotAvailable);
        }
        enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide)?;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TermError> {
        let _ = execute!(self.stdout, cursor::Show);
        let _ = disable_raw_mode();
        let _ = writeln!(self.stdout);
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> Result<bool, TermError> {
        Ok(event::poll(timeout)?)
    }

    fn read_event(&mut self) -> Result<CrosstermEvent, TermError> {
        Ok(event::read()?)
    }

    fn draw_line(&mut self, line: &str) -> Result<(), TermError> {
        execute!(
            self.stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    fn columns(&mut self) -> Result<u16, TermError> {
        Ok(terminal::size()?.0)
    }
}

/// Scripted backend for driving the run loop without a TTY.
///
/// `poll` answers from the script; when the script (or the event queue) runs
/// dry the backend reports a `q` key so a test run always terminates.
pub struct TestableBackend {
    columns: u16,
    entered: bool,
    left: bool,
    events: VecDeque<CrosstermEvent>,
    poll_script: VecDeque<bool>,
    lines: Vec<String>,
}

impl TestableBackend {
    /// Create a scripted backend `columns` wide.
    #[must_use]
    pub fn new(columns: u16) -> Self {
        Self {
            columns,
            entered: false,
            left: false,
            events: VecDeque::new(),
            poll_script: VecDeque::new(),
            lines: Vec::new(),
        }
    }

    /// Queue an input event.
    pub fn push_event(&mut self, event: CrosstermEvent) {
        self.events.push_back(event);
    }

    /// Queue a key press.
    pub fn push_key(&mut self, code: KeyCode) {
        self.push_event(CrosstermEvent::Key(KeyEvent::new(
            code,
            KeyModifiers::NONE,
        )));
    }

    /// Script the next `poll` answers; afterwards `poll` reports input ready.
    pub fn script_polls(&mut self, answers: impl IntoIterator<Item = bool>) {
        self.poll_script.extend(answers);
    }

    /// Every line drawn, in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether `enter` ran.
    #[must_use]
    pub const fn entered(&self) -> bool {
        self.entered
    }

    /// Whether `leave` ran.
    #[must_use]
    pub const fn left(&self) -> bool {
        self.left
    }
}

impl TerminalBackend for TestableBackend {
    fn enter(&mut self) -> Result<(), TermError> {
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self) -> Result<(), TermError> {
        self.left = true;
        Ok(())
    }

    fn poll(&mut self, _timeout: Duration) -> Result<bool, TermError> {
        Ok(self.poll_script.pop_front().unwrap_or(true))
    }

    fn read_event(&mut self) -> Result<CrosstermEvent, TermError> {
        Ok(self.events.pop_front().unwrap_or_else(|| {
            CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))
        }))
    }

    fn draw_line(&mut self, line: &str) -> Result<(), TermError> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn columns(&mut self) -> Result<u16, TermError> {
        Ok(self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testable_backend_records_lines() {
        let mut backend = TestableBackend::new(80);
        backend.draw_line("Hello|").expect("draw succeeds");
        backend.draw_line("Hello ").expect("draw succeeds");
        assert_eq!(backend.lines(), &["Hello|".to_string(), "Hello ".to_string()]);
    }

    #[test]
    fn test_testable_backend_scripted_polls_then_quit() {
        let mut backend = TestableBackend::new(80);
        backend.script_polls([false, false]);
        assert!(!backend.poll(Duration::ZERO).expect("poll answers"));
        assert!(!backend.poll(Duration::ZERO).expect("poll answers"));
        // Script dry: input is "ready" and the event is a quit key.
        assert!(backend.poll(Duration::ZERO).expect("poll answers"));
        let event = backend.read_event().expect("event available");
        assert!(matches!(
            event,
            CrosstermEvent::Key(key) if key.code == KeyCode::Char('q')
        ));
    }

    #[test]
    fn test_testable_backend_tracks_enter_leave() {
        let mut backend = TestableBackend::new(40);
        assert!(!backend.entered());
        backend.enter().expect("enter succeeds");
        backend.leave().expect("leave succeeds");
        assert!(backend.entered());
        assert!(backend.left());
    }
}
