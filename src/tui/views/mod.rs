use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod commits;
mod files;
mod help;
mod statistics;

pub use commits::draw_commits_view;
pub use files::draw_files_view;
pub use help::draw_help_overlay;
pub use statistics::draw_statistics_view;

const PALETTE: [Color; 10] = [
    Color::Blue,
    Color::LightRed,
    Color::Red,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::LightMagenta,
    Color::Rgb(156, 117, 95),
    Color::Gray,
];

/// Colour for a file type, by its position in `kinds`.
pub(crate) fn type_color(kinds: &[String], kind: &str) -> Color {
    kinds
        .iter()
        .position(|k| k == kind)
        .map(|i| PALETTE[i % PALETTE.len()])
        .unwrap_or(Color::DarkGray)
}

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Truncate a string to `max` chars with an ellipsis when necessary.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
