//! LazySeq - Terminal-based sequence editor
//!
//! Renders a row of draggable markers on a chart, supports reordering by
//! drag, and offers a click-triggered menu with create/read/update/delete
//! operations on the underlying element list.

use anyhow::Result;
use clap::{Parser, ValueEnum};

use lazyseq::config::{Config, ThemeMode};
use lazyseq::constants::{APP_BINARY_NAME, APP_NAME};
use lazyseq::models::Sequence;
use lazyseq::tui;

/// Theme choice on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    /// Detect the OS theme
    Auto,
    /// Always use the dark theme
    Dark,
    /// Always use the light theme
    Light,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Auto => Self::Auto,
            ThemeArg::Dark => Self::Dark,
            ThemeArg::Light => Self::Light,
        }
    }
}

/// LazySeq - Terminal-based sequence editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Start with an empty sequence instead of the demo elements
    #[arg(long)]
    empty: bool,

    /// Override the configured theme for this run
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config, falling back to defaults on a missing or broken file
    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {e}");
        eprintln!("Falling back to defaults. Check with: {APP_BINARY_NAME} --help");
        Config::default()
    });

    if let Some(theme) = cli.theme {
        config.ui.theme_mode = theme.into();
    }

    let sequence = if cli.empty {
        Sequence::new()
    } else {
        Sequence::seeded()
    };

    println!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    // Initialize TUI
    let mut terminal = tui::setup_terminal()?;
    let mut app_state = tui::AppState::new(sequence, config);

    // Run main TUI loop
    let result = tui::run_tui(&mut app_state, &mut terminal);

    // Restore terminal before surfacing any error
    tui::restore_terminal(terminal)?;

    result?;

    Ok(())
}
