use std::time::Instant;

use ratatui::layout::Rect;

use crate::context::MetaContext;
use crate::model::Commit;
use crate::selection::{Region, Selection};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewMode {
    Commits,
    Files,
    Statistics,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Commits, ViewMode::Files, ViewMode::Statistics];

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Commits => "Commits",
            ViewMode::Files => "Files",
            ViewMode::Statistics => "Stats",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }
}

/// A rectangle being dragged out on the plot, in plot coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub anchor: (f64, f64),
    pub extent: (f64, f64),
    pub toggle: bool,
}

impl Brush {
    pub fn region(&self) -> Region {
        Region::new(self.anchor, self.extent)
    }
}

pub struct TuiState {
    pub view_mode: ViewMode,
    pub show_help: bool,
    /// Rectangle in progress; the selection follows it until release.
    pub brush: Option<Brush>,
    /// Selection as it stood when the brush began.
    pub brush_base: Option<Selection>,
    /// Where the chart was last drawn, for mapping mouse cells to the plot.
    pub chart_area: Rect,
    pub commit_selected: usize,
    pub commit_visible: usize,
    pub files_offset: f64,
    pub files_visible: usize,
    pub status_message: Option<(String, Instant)>,
    pub no_data: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Commits,
            show_help: false,
            brush: None,
            brush_base: None,
            chart_area: Rect::default(),
            commit_selected: 0,
            commit_visible: 10,
            files_offset: 0.0,
            files_visible: 10,
            status_message: None,
            no_data: false,
        }
    }
}

impl TuiState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn next_view(&mut self) {
        let idx = (self.view_mode.index() + 1) % ViewMode::ALL.len();
        self.view_mode = ViewMode::ALL[idx];
    }

    pub fn prev_view(&mut self) {
        let len = ViewMode::ALL.len();
        let idx = (self.view_mode.index() + len - 1) % len;
        self.view_mode = ViewMode::ALL[idx];
    }
}

/// Commits listed beside the chart: the selection, or everything in the
/// time window when nothing is selected.
pub fn listed_commits(ctx: &MetaContext) -> Vec<&Commit> {
    let selected = ctx.selected_commits();
    if selected.is_empty() {
        ctx.filtered()
    } else {
        selected
    }
}
