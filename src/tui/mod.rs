//! TUI module for interactive tree browsing and editing.

pub mod app;
pub mod event;
pub mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub use app::{App, Mode, TreeAction, ViewSettings};

use crate::error::Result;
use crate::model::TreeNode;

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Poll interval while a transition is running (about 60 fps).
const ANIMATION_POLL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Run the interactive viewer until the user quits.
pub fn run(source: PathBuf, data: Vec<TreeNode>, settings: ViewSettings) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(source, data, settings);

    let result = run_app(&mut terminal, &mut app);

    // Restore even if the loop failed.
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> io::Result<CrosstermTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut CrosstermTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(terminal: &mut CrosstermTerminal, app: &mut App) -> Result<()> {
    while !app.should_quit {
        app.tree.tick(Instant::now());
        terminal.draw(|frame| ui::render(app, frame))?;

        let timeout = if app.tree.is_animating() {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };
        event::handle_events(app, timeout)?;
    }

    tracing::debug!(nodes = app.tree.len(), "Viewer closed");
    Ok(())
}
