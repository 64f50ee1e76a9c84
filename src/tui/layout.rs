use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::config::UsableArea;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Inside of a bordered block.
pub fn inner(r: Rect) -> Rect {
    Rect {
        x: r.x.saturating_add(1),
        y: r.y.saturating_add(1),
        width: r.width.saturating_sub(2),
        height: r.height.saturating_sub(2),
    }
}

/// Plot coordinates at the centre of a terminal cell inside the chart.
/// Screen rows grow downwards like plot `y`, so no flip is needed here.
pub fn cell_to_plot(chart: Rect, area: UsableArea, column: u16, row: u16) -> Option<(f64, f64)> {
    if chart.width == 0 || chart.height == 0 {
        return None;
    }
    if column < chart.x || row < chart.y || column >= chart.right() || row >= chart.bottom() {
        return None;
    }
    let fx = (column - chart.x) as f64 + 0.5;
    let fy = (row - chart.y) as f64 + 0.5;
    Some((
        area.left + fx / chart.width as f64 * area.width(),
        area.top + fy / chart.height as f64 * area.height(),
    ))
}

/// Chart `y` for a plot `y`: charts grow upwards, the plot grows downwards.
pub fn flip_y(area: UsableArea, y: f64) -> f64 {
    area.top + area.bottom - y
}

/// Rows of a list that fit in a bordered block with a header line.
pub fn list_capacity(r: Rect) -> usize {
    r.height.saturating_sub(3) as usize
}
