use std::time::Duration;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use crate::breakdown::breakdown;
use crate::context::MetaContext;

use super::state::{TuiState, ViewMode};
use super::views::{draw_commits_view, draw_files_view, draw_help_overlay, draw_statistics_view};

const STATUS_TTL: Duration = Duration::from_secs(4);

/// Render one frame: view tabs, the active view and a status line.
pub fn draw(f: &mut Frame, state: &mut TuiState, ctx: &MetaContext) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    let titles: Vec<&str> = ViewMode::ALL.iter().map(|m| m.title()).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("locviz"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .select(state.view_mode.index());
    f.render_widget(tabs, chunks[0]);

    // colours follow first appearance across the whole time window
    let kinds: Vec<String> = breakdown(ctx.filtered())
        .shares
        .into_iter()
        .map(|s| s.kind)
        .collect();

    if state.no_data {
        let placeholder = Paragraph::new("No data loaded. Check --data and the log output.")
            .block(Block::default().title("No data").borders(Borders::ALL));
        f.render_widget(placeholder, chunks[1]);
    } else {
        match state.view_mode {
            ViewMode::Commits => draw_commits_view(f, chunks[1], ctx, state, &kinds),
            ViewMode::Files => draw_files_view(f, chunks[1], ctx, state, &kinds),
            ViewMode::Statistics => draw_statistics_view(f, chunks[1], ctx, &kinds),
        }
    }

    f.render_widget(Paragraph::new(status_line(state)), chunks[2]);

    if state.show_help {
        draw_help_overlay(f, size);
    }
}

fn status_line(state: &TuiState) -> Line<'static> {
    if let Some((message, at)) = &state.status_message {
        if at.elapsed() < STATUS_TTL {
            return Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }
    }
    let hint = if state.brush.is_some() {
        " arrows resize  Enter apply  Esc cancel"
    } else {
        " [ ] cursor  drag/b brush  Tab views  c copy  h help  q quit"
    };
    Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
}
