//! `titular`: animate a rotating headline in the terminal.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use titular_core::{HeadlineStore, SpeedConfig};
use titular_terminal::{App, CrosstermBackend, FileConfig, FileWatcher, TermError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "titular",
    version,
    about = "Typewriter-style rotating headline for the terminal"
)]
struct Cli {
    /// Comma-separated phrases to rotate through.
    phrases: Option<String>,

    /// Load phrases and presentation from a TOML file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Watch a file whose contents supply the phrases.
    #[arg(long, value_name = "PATH")]
    watch: Option<PathBuf>,

    /// Milliseconds between typed characters.
    #[arg(long, value_name = "MS")]
    typing_ms: Option<u64>,

    /// Milliseconds between deleted characters.
    #[arg(long, value_name = "MS")]
    deleting_ms: Option<u64>,

    /// Milliseconds to hold a fully typed phrase.
    #[arg(long, value_name = "MS")]
    hold_typed_ms: Option<u64>,

    /// Milliseconds to hold the empty line between phrases.
    #[arg(long, value_name = "MS")]
    hold_deleted_ms: Option<u64>,

    /// Stop after one pass instead of looping.
    #[arg(long)]
    no_loop: bool,
}

impl Cli {
    fn speed(&self, base: SpeedConfig) -> SpeedConfig {
        let mut speed = base;
        if let Some(ms) = self.typing_ms {
            speed.typing_ms_per_char = ms;
        }
        if let Some(ms) = self.deleting_ms {
            speed.deleting_ms_per_char = ms;
        }
        if let Some(ms) = self.hold_typed_ms {
            speed.hold_on_typed_ms = ms;
        }
        if let Some(ms) = self.hold_deleted_ms {
            speed.hold_on_deleted_ms = ms;
        }
        if self.no_loop {
            speed.looping = false;
        }
        speed
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("titular: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), TermError> {
    let file_config = cli
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?
        .unwrap_or_default();
    let speed = cli.speed(file_config.speed);

    let store = HeadlineStore::new();
    if let Some(phrases) = cli.phrases.clone().or_else(|| file_config.phrases.clone()) {
        store.set(phrases);
    } else if let Some(path) = &cli.watch {
        // Seed from the watched file so the first paint has content.
        if let Ok(contents) = std::fs::read_to_string(path) {
            store.set(contents.trim_end());
        }
    }

    let _watcher = cli
        .watch
        .clone()
        .map(|path| FileWatcher::new(path, store.clone()).spawn());

    let headline = file_config.headline.widget();
    let mut app = App::connect(CrosstermBackend::new(), &store, speed, headline);
    app.run()
}
