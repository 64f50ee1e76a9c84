use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::context::MetaContext;
use crate::window::ScrollWindow;

use super::super::layout::list_capacity;
use super::super::state::TuiState;
use super::{header_cell, truncate, type_color};

const DOT: &str = "•";

/// Files in the time window, largest first, one dot per line coloured by
/// type. Only the rows inside the scroll window are built.
pub fn draw_files_view(
    f: &mut Frame,
    area: Rect,
    ctx: &MetaContext,
    state: &mut TuiState,
    kinds: &[String],
) {
    let groups = ctx.file_groups();
    if groups.is_empty() {
        let placeholder =
            Paragraph::new("No data").block(Block::default().title("Files").borders(Borders::ALL));
        f.render_widget(placeholder, area);
        return;
    }

    state.files_visible = list_capacity(area).max(1);
    let window = ScrollWindow::new(1.0, state.files_visible);
    let range = window.range(groups.len(), state.files_offset);

    let name_width = 32usize;
    let dots_width = (area.width as usize).saturating_sub(name_width + 20).max(1);

    let rows: Vec<Row> = groups[range.clone()]
        .iter()
        .map(|group| {
            let mut dots: Vec<Span> = group
                .lines
                .iter()
                .take(dots_width)
                .map(|l| Span::styled(DOT, Style::default().fg(type_color(kinds, &l.kind))))
                .collect();
            if group.len() > dots_width {
                dots.push(Span::raw("+"));
            }
            Row::new(vec![
                Cell::from(truncate(group.name, name_width)),
                Cell::from(format!("{}", group.len())),
                Cell::from(group.dominant_kind().to_string())
                    .style(Style::default().fg(type_color(kinds, group.dominant_kind()))),
                Cell::from(Line::from(dots)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(name_width as u16),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Min(1),
        ],
    )
    .header(Row::new([
        header_cell("File", Color::Yellow),
        header_cell("Lines", Color::Green),
        header_cell("Type", Color::Cyan),
        header_cell("", Color::White),
    ]))
    .block(
        Block::default()
            .title(format!(
                "Files {}-{} of {}",
                range.start + 1,
                range.end,
                groups.len()
            ))
            .borders(Borders::ALL),
    );
    f.render_widget(table, area);
}
