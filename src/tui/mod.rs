pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, warn};

use crate::app::{AppContext, Result};

use self::app::{QuakeList, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let query = ctx.query();
    let loader = ctx.loader_for(&query, QuakeList::default())?;
    let mut tui_app = TuiApp::new(loader, query);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let config = &ctx.config;

    tui_app.loader.start_loading();

    loop {
        if tui_app.poll_loader() {
            debug!("Showing {} earthquakes", tui_app.rows().len());
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                tui_app.clear_status();
                match config.keybindings.get_action(&key) {
                    Action::Quit => {
                        tui_app.should_quit = true;
                    }
                    Action::MoveUp => {
                        tui_app.move_up();
                    }
                    Action::MoveDown => {
                        tui_app.move_down();
                    }
                    Action::NextPage => {
                        tui_app.next_page();
                    }
                    Action::PrevPage => {
                        tui_app.prev_page();
                    }
                    Action::OpenInBrowser => {
                        let url = tui_app.selected_row().map(|row| row.detail_url.clone());
                        if let Some(url) = url {
                            if let Err(e) = open::that(&url) {
                                warn!("Failed to open {}: {}", url, e);
                                tui_app.set_status(format!("Failed to open browser: {}", e));
                            }
                        }
                    }
                    Action::Refresh => {
                        tui_app.refresh();
                    }
                    Action::Clear => {
                        tui_app.clear();
                        tui_app.set_status("Cleared".to_string());
                    }
                    Action::RaiseMinMagnitude => {
                        if let Err(e) = tui_app.change_min_magnitude(1.0) {
                            tui_app.set_status(format!("Cannot change magnitude: {}", e));
                        }
                    }
                    Action::LowerMinMagnitude => {
                        if let Err(e) = tui_app.change_min_magnitude(-1.0) {
                            tui_app.set_status(format!("Cannot change magnitude: {}", e));
                        }
                    }
                    Action::None => {}
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    tui_app.loader.destroy();
    Ok(())
}
