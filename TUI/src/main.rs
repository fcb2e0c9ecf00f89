//! Bingo - terminal bingo companion
//!
//! Two screens: a random card generator (Cartela) and a number drawer with a
//! slot-machine reveal (Sorteador).

mod action;
mod app;
mod card;
mod config;
mod keymap;
mod pool;
mod reveal;
mod scheduler;
mod session;
mod ui;
mod ui_state;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use action::Action;
use app::App;
use config::Config;
use keymap::KeyMap;
use ui::draw;
use ui_state::Screen;

#[derive(Parser)]
#[command(name = "bingo")]
#[command(about = "Bingo card generator and number drawer", long_about = None)]
struct Cli {
    /// Configuration file path (default: <config dir>/bingo-tui/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for reproducible cards and draws
    #[arg(long)]
    seed: Option<u64>,

    /// Screen to open on start
    #[arg(short, long, value_enum, default_value = "home")]
    screen: Screen,

    /// Log file (level from RUST_LOG, default info)
    #[arg(long, value_name = "FILE", default_value = "bingo.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // TUI apps can't log to stdout, so we write to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .with_context(|| format!("Failed to open log file {}", cli.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    tracing::info!(seed = ?config.seed, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, cli.screen);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("exited with error: {:#}", e);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(app.config.tick_rate_ms);

    while !app.should_quit {
        // Advance animation frame and fire due reveal timers
        app.tick();

        terminal.draw(|frame| draw(frame, app))?;

        // Wake early if a reveal timer is due before the next frame
        let timeout = app.next_timer_in().map_or(tick_rate, |due| due.min(tick_rate));
        if !event::poll(timeout)? {
            continue;
        }

        let action = match event::read()? {
            Event::Key(key) => KeyMap::map(&app.ui, key),
            Event::Mouse(mouse) if app.ui.screen == Screen::Cartela && app.ui.confirm.is_none() => {
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        let size = terminal.size()?;
                        let area = Rect::new(0, 0, size.width, size.height);
                        ui::card_cell_at(area, mouse.column, mouse.row).map(Action::MarkCell)
                    }
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(action) = action {
            tracing::debug!(?action, "action");
            app.apply(action);
        }
    }

    Ok(())
}
