use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::breakdown::format_percent;
use crate::context::MetaContext;

use super::type_color;

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::White)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Summary numbers for the time window and a bar per file type.
pub fn draw_statistics_view(f: &mut Frame, area: Rect, ctx: &MetaContext, kinds: &[String]) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let summary = ctx.summary();
    let mut text = vec![
        Line::from(vec![Span::styled(
            "Codebase",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        stat_line("Lines of code", summary.total_loc.to_string(), Color::Green),
        stat_line("Commits", summary.total_commits.to_string(), Color::Green),
        stat_line("Files", summary.files.to_string(), Color::Cyan),
        stat_line("Authors", summary.authors.to_string(), Color::Cyan),
        stat_line(
            "Avg file length",
            format!("{:.1}", summary.avg_file_length),
            Color::Cyan,
        ),
        stat_line("Max depth", summary.max_depth.to_string(), Color::Blue),
        stat_line("Longest line", summary.longest_line.to_string(), Color::Blue),
    ];
    if let Some((name, lines)) = &summary.longest_file {
        text.push(stat_line("Longest file", format!("{name} ({lines})"), Color::Magenta));
    }
    text.push(Line::from(""));
    if let Some(period) = summary.busiest_period {
        text.push(stat_line("Busiest time of day", period, Color::Yellow));
    }
    if let Some(day) = summary.busiest_weekday {
        text.push(stat_line("Busiest day", day, Color::Yellow));
    }

    f.render_widget(
        Paragraph::new(text).block(Block::default().title("Summary").borders(Borders::ALL)),
        chunks[0],
    );

    let breakdown = ctx.breakdown();
    let bar_width = (chunks[1].width as usize).saturating_sub(26).max(1);
    let bars: Vec<Line> = breakdown
        .shares
        .iter()
        .map(|share| {
            let filled = (share.proportion * bar_width as f64).round() as usize;
            let color = type_color(kinds, &share.kind);
            Line::from(vec![
                Span::styled(format!("{:<10}", share.kind), Style::default().fg(color)),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::raw(format!(" {}", format_percent(share.proportion))),
            ])
        })
        .collect();

    f.render_widget(
        Paragraph::new(bars).block(Block::default().title("Share of lines").borders(Borders::ALL)),
        chunks[1],
    );
}
