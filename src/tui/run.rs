use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::cli::CommonArgs;
use crate::context::MetaContext;
use crate::logging;

use super::draw::draw;
use super::events::{handle_key_event, handle_mouse_event};
use super::state::TuiState;

/// Load with a spinner. A failed load is logged and leaves an empty
/// context so the explorer still opens.
fn load_context(common: &CommonArgs, state: &mut TuiState) -> MetaContext {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Loading {}...", common.data.display()));
    pb.enable_steady_tick(Duration::from_millis(80));

    let result = common.open_context();
    pb.finish_and_clear();

    match result {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("{e:#}");
            state.no_data = true;
            state.set_status(format!("Load error: {e}"));
            MetaContext::from_records(Vec::new(), &common.plot_config())
        }
    }
}

pub fn run(common: &CommonArgs) -> io::Result<()> {
    let mut state = TuiState::default();
    let mut ctx = load_context(common, &mut state);
    let repo_url = common.repo_url.as_deref();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    // stderr shares the terminal with the frame
    let quiet = logging::silence();
    let result = event_loop(&mut terminal, &mut state, &mut ctx, repo_url);
    drop(quiet);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut TuiState,
    ctx: &mut MetaContext,
    repo_url: Option<&str>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, state, ctx))?;

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_event(key_event, state, ctx, repo_url) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse_event(mouse_event, state, ctx),
                _ => {}
            }
        }
    }
}
