//! groupboard-tui - TUI frontend for groupboard using Ratatui

pub mod app;
pub mod components;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::App;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use groupboard_core::Dashboard;
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Run the TUI application until the user quits
///
/// Mounts the dashboard's first tab, then redraws every 100ms so panel state
/// changes from background fetches show up without user input.
///
/// The theme is written back to the preferences only when `theme_pinned` is
/// set or the user toggles it, so a detected theme is re-detected next run.
pub async fn run(
    dashboard: Dashboard,
    prefs_dir: Option<PathBuf>,
    theme_pinned: bool,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(dashboard, prefs_dir).with_pinned_theme(theme_pinned);
    app.dashboard.mount();

    let result = run_loop(&mut terminal, &mut app).await;

    app.dashboard.unmount();
    app.save_preferences();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("TUI exited");
    result
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Poll off the runtime threads so fetch tasks keep progressing
        let key = tokio::task::block_in_place(|| -> io::Result<Option<event::KeyEvent>> {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    return Ok(Some(key));
                }
            }
            Ok(None)
        })?;

        if let Some(key) = key {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
