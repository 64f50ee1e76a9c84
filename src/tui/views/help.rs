use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing keys and mouse actions.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "locviz - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Time cursor:"),
        Line::from("  [ / ]       Move 1%"),
        Line::from("  { / }       Move 10%"),
        Line::from("  Home/End    Earliest / latest commit"),
        Line::from(""),
        section("Selection:"),
        Line::from("  Mouse drag  Brush a region of the chart"),
        Line::from("  Shift+drag  Toggle commits in a region"),
        Line::from("  b / t       Keyboard brush / toggle, arrows resize, Enter applies"),
        Line::from("  Esc         Clear selection, or cancel a brush"),
        Line::from(""),
        section("Lists:"),
        Line::from("  j/k or ↑/↓  Move through commits or scroll files"),
        Line::from("  PgUp/PgDn   Move by 10 rows"),
        Line::from("  Wheel       Scroll"),
        Line::from("  c / y       Copy commit id / commit URL"),
        Line::from(""),
        section("General:"),
        Line::from("  Tab         Next view (Commits/Files/Stats)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
