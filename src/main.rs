//! TOMATUI - Terminal Pomodoro Timer
//!
//! A terminal-based Pomodoro timer built in Rust. Start a work cycle with a
//! task label and a target duration, watch the countdown, interrupt it or let
//! it finish, and browse the persistent cycle history.

use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::{App, CyclesStore};
use infrastructure::{StateRepository, STORAGE_FILE};
use presentation::{render_ui, InputHandler};

/// How long the event loop waits for input before running a timer tick.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Entry point for the TOMATUI terminal Pomodoro timer.
///
/// Restores the persisted cycle state, sets up the terminal interface, and
/// runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the state file is unreadable or malformed, or if
/// terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = CyclesStore::open(StateRepository::new(STORAGE_FILE))?;
    let mut app = App::new(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering, keyboard input, and the once-per-interval
/// timer tick that advances the countdown and auto-finishes cycles.
/// Continues running until the user presses 'q' in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(TICK_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q')
                            if matches!(app.mode, application::AppMode::Normal) =>
                        {
                            return Ok(())
                        }
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        app.tick(Utc::now());
    }
}
