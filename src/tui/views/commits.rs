use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, Gauge, GraphType, Paragraph, Row, Table,
};
use ratatui::Frame;

use crate::breakdown::format_percent;
use crate::config::UsableArea;
use crate::context::MetaContext;
use crate::selection::Region;
use crate::window::ScrollWindow;

use super::super::layout::{flip_y, inner, list_capacity};
use super::super::state::{listed_commits, TuiState};
use super::{header_cell, truncate, type_color};

/// Scatter of commits over time against hour of day, with the time cursor,
/// the breakdown of the selection and the listed commits alongside.
pub fn draw_commits_view(
    f: &mut Frame,
    area: Rect,
    ctx: &MetaContext,
    state: &mut TuiState,
    kinds: &[String],
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Min(5),
        ])
        .split(chunks[1]);

    draw_chart(f, chunks[0], ctx, state);
    draw_cursor_gauge(f, side[0], ctx);
    draw_selection_count(f, side[1], ctx);
    draw_breakdown(f, side[2], ctx, kinds);
    draw_commit_list(f, side[3], ctx, state);
}

fn outline(area: UsableArea, region: Region) -> Vec<(f64, f64)> {
    let [x0, y0, x1, y1] = region.as_array();
    let (top, bottom) = (flip_y(area, y0), flip_y(area, y1));
    vec![(x0, top), (x1, top), (x1, bottom), (x0, bottom), (x0, top)]
}

fn draw_chart(f: &mut Frame, area: Rect, ctx: &MetaContext, state: &mut TuiState) {
    state.chart_area = inner(area);
    let plot = ctx.projection().area();

    let mut plain = Vec::new();
    let mut picked = Vec::new();
    for commit in ctx.draw_order() {
        let Some((x, y)) = ctx.projection().project(commit) else {
            continue;
        };
        let point = (x, flip_y(plot, y));
        if ctx.is_selected(commit) {
            picked.push(point);
        } else {
            plain.push(point);
        }
    }

    let applied = ctx
        .selection()
        .region()
        .map(|r| outline(plot, r))
        .unwrap_or_default();
    let pending = state
        .brush
        .map(|b| outline(plot, b.region()))
        .unwrap_or_default();

    let datasets = vec![
        Dataset::default()
            .name("commits")
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&plain),
        Dataset::default()
            .name("selected")
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .data(&picked),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&applied),
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::White))
            .data(&pending),
    ];

    let title = match ctx.scale() {
        Some(scale) => format!(
            "Commits {} to {}, hour of day bottom to top",
            scale.min().format("%Y-%m-%d"),
            scale.max().format("%Y-%m-%d")
        ),
        None => "Commits".to_string(),
    };

    // No axis labels: the graph then fills the block, which the mouse
    // mapping relies on.
    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(Axis::default().bounds([plot.left, plot.right]))
        .y_axis(Axis::default().bounds([plot.top, plot.bottom]));
    f.render_widget(chart, area);
}

fn draw_cursor_gauge(f: &mut Frame, area: Rect, ctx: &MetaContext) {
    let label = match ctx.cutoff() {
        Some(cutoff) => format!(
            "{} ({})",
            cutoff.format("%Y-%m-%d %H:%M"),
            format_percent(ctx.cursor() / 100.0)
        ),
        None => "no dated commits".to_string(),
    };
    let gauge = Gauge::default()
        .block(Block::default().title("Show commits until").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((ctx.cursor() / 100.0).clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_selection_count(f: &mut Frame, area: Rect, ctx: &MetaContext) {
    let selected = ctx.selection().len();
    let text = if selected == 0 {
        Line::from(vec![
            Span::styled("No commits selected", Style::default().fg(Color::Gray)),
            Span::raw(format!("  ({} in range)", ctx.filtered().len())),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                format!("{selected} commits selected"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  of {}", ctx.filtered().len())),
        ])
    };
    f.render_widget(
        Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_breakdown(f: &mut Frame, area: Rect, ctx: &MetaContext, kinds: &[String]) {
    let breakdown = ctx.breakdown();
    let title = if ctx.selection().is_empty() {
        "Lines by type"
    } else {
        "Lines by type (selection)"
    };

    let rows: Vec<Row> = breakdown
        .shares
        .iter()
        .map(|share| {
            Row::new(vec![
                Cell::from(share.kind.clone())
                    .style(Style::default().fg(type_color(kinds, &share.kind))),
                Cell::from(format!("{}", share.count)),
                Cell::from(format_percent(share.proportion)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(Row::new([
        header_cell("Type", Color::Yellow),
        header_cell("Lines", Color::Green),
        header_cell("Share", Color::Cyan),
    ]))
    .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(table, area);
}

fn draw_commit_list(f: &mut Frame, area: Rect, ctx: &MetaContext, state: &mut TuiState) {
    let listed = listed_commits(ctx);
    state.commit_visible = list_capacity(area).max(1);
    state.commit_selected = state.commit_selected.min(listed.len().saturating_sub(1));

    // keep the highlighted row on screen
    let window = ScrollWindow::new(1.0, state.commit_visible);
    let top = (state.commit_selected + 1).saturating_sub(state.commit_visible);
    let range = window.range(listed.len(), window.offset_of(top));

    let rows: Vec<Row> = listed[range.clone()]
        .iter()
        .enumerate()
        .map(|(i, commit)| {
            let date = commit
                .datetime
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "invalid".to_string());
            let row = Row::new(vec![
                Cell::from(commit.short_id().to_string())
                    .style(Style::default().fg(Color::Yellow)),
                Cell::from(truncate(&commit.author, 14)),
                Cell::from(date),
                Cell::from(format!("{}", commit.total_lines)),
            ]);
            if range.start + i == state.commit_selected {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Length(15),
            Constraint::Length(17),
            Constraint::Min(5),
        ],
    )
    .header(Row::new([
        header_cell("Commit", Color::Yellow),
        header_cell("Author", Color::Green),
        header_cell("Date", Color::Cyan),
        header_cell("Lines", Color::White),
    ]))
    .block(
        Block::default()
            .title(format!("Commits ({})", listed.len()))
            .borders(Borders::ALL),
    );
    f.render_widget(table, area);
}
