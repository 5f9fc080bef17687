//! Terminal front end for titular rotating headlines.
//!
//! Renders a [`titular_widgets::RotatingHeadline`] on one terminal line,
//! driven by real timers, with a file-backed phrase source so the headline
//! re-synchronizes live when the watched file changes.

mod app;
mod backend;
mod config;
mod error;
mod watch;

pub use app::App;
pub use backend::{CrosstermBackend, TerminalBackend, TestableBackend};
pub use config::{FileConfig, HeadlineConfig};
pub use error::TermError;
pub use watch::{FileWatcher, WatcherHandle, DEFAULT_POLL_INTERVAL};
