use std::path::Path;

use log::{debug, info};

use crate::aggregate::{group_commits, sort_by_size};
use crate::breakdown::breakdown_or_all;
use crate::config::PlotConfig;
use crate::error::Result;
use crate::files::{self, FileGroup};
use crate::load::load_records;
use crate::model::{Breakdown, Commit, Instant, LineRecord, Summary};
use crate::selection::{Projection, Region, Selection};
use crate::stats::summarize;
use crate::timeline::{indices_until, TimeScale};
use crate::window::ScrollWindow;

/// Everything the explorer works on: the commit population, the time
/// cursor with its filtered view, and the brush selection.
///
/// Built once from the loaded records; event handlers go through its
/// methods.
#[derive(Debug)]
pub struct MetaContext {
    commits: Vec<Commit>,
    scale: Option<TimeScale>,
    projection: Projection,
    cursor: f64,
    cutoff: Option<Instant>,
    filtered: Vec<usize>,
    selection: Selection,
}

impl MetaContext {
    pub fn from_records(records: Vec<LineRecord>, plot: &PlotConfig) -> Self {
        let commits = group_commits(records);
        let scale = TimeScale::from_commits(&commits);
        let projection = Projection::new(plot, scale);

        let mut ctx = Self {
            commits,
            scale,
            projection,
            cursor: 100.0,
            cutoff: None,
            filtered: Vec::new(),
            selection: Selection::new(),
        };
        ctx.set_cursor(100.0);
        ctx
    }

    pub fn load(path: &Path, plot: &PlotConfig) -> Result<Self> {
        let records = load_records(path)?;
        let ctx = Self::from_records(records, plot);
        info!(
            "{} commits from {}",
            ctx.commits.len(),
            path.display()
        );
        Ok(ctx)
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn scale(&self) -> Option<TimeScale> {
        self.scale
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn cutoff(&self) -> Option<Instant> {
        self.cutoff
    }

    /// Move the time cursor and rebuild the filtered view from scratch.
    /// The plot is redrawn, so the brush is cleared.
    pub fn set_cursor(&mut self, percent: f64) {
        self.cursor = if percent.is_nan() { 100.0 } else { percent.clamp(0.0, 100.0) };
        self.cutoff = self.scale.map(|s| s.instant_at(self.cursor));
        self.apply_cutoff();
    }

    /// Filter on an explicit instant; the cursor follows it.
    pub fn set_cutoff(&mut self, cutoff: Instant) {
        self.cursor = self.scale.map(|s| s.percent_of(cutoff)).unwrap_or(100.0);
        self.cutoff = Some(cutoff);
        self.apply_cutoff();
    }

    fn apply_cutoff(&mut self) {
        self.filtered = match self.cutoff {
            Some(cutoff) => indices_until(&self.commits, cutoff),
            None => Vec::new(),
        };
        self.selection.clear();
        debug!(
            "cursor {:.1}% keeps {} of {} commits",
            self.cursor,
            self.filtered.len(),
            self.commits.len()
        );
    }

    /// Commits at or before the cutoff, in load order.
    pub fn filtered(&self) -> Vec<&Commit> {
        self.filtered.iter().map(|&i| &self.commits[i]).collect()
    }

    /// Filtered commits, largest first, the order points are drawn in.
    pub fn draw_order(&self) -> Vec<&Commit> {
        let mut commits = self.filtered();
        sort_by_size(&mut commits);
        commits
    }

    pub fn brush(&mut self, region: Option<Region>) {
        let population = self.filtered.iter().map(|&i| &self.commits[i]).collect::<Vec<_>>();
        self.selection.brush(region, &population, &self.projection);
    }

    pub fn toggle(&mut self, region: Region) {
        let population = self.filtered.iter().map(|&i| &self.commits[i]).collect::<Vec<_>>();
        self.selection.toggle(region, &population, &self.projection);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Put back a selection taken earlier with [`MetaContext::selection`].
    pub fn restore_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, commit: &Commit) -> bool {
        self.selection.is_selected(commit)
    }

    pub fn selected_commits(&self) -> Vec<&Commit> {
        self.selection.selected(&self.filtered())
    }

    /// Type breakdown of the selection, or of every filtered commit when
    /// nothing is selected.
    pub fn breakdown(&self) -> Breakdown {
        breakdown_or_all(&self.selected_commits(), &self.filtered())
    }

    /// Files touched by the filtered commits, largest first.
    pub fn file_groups(&self) -> Vec<FileGroup<'_>> {
        let mut groups = files::group_files(self.filtered().into_iter().flat_map(|c| c.lines()));
        files::sort_by_size(&mut groups);
        groups
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.filtered())
    }

    /// The slice of filtered commits visible at `offset`.
    pub fn commit_window(&self, window: &ScrollWindow, offset: f64) -> Vec<&Commit> {
        let filtered = self.filtered();
        window.slice(&filtered, offset).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{record, two_commit_records};

    fn context() -> MetaContext {
        MetaContext::from_records(
            vec![
                record("early", "a.js", "js", "2025-01-01T06:00:00Z"),
                record("early", "b.css", "css", "2025-01-01T06:00:00Z"),
                record("mid", "a.js", "js", "2025-01-11T12:00:00Z"),
                record("late", "a.js", "js", "2025-01-21T18:00:00Z"),
                record("late", "c.md", "md", "2025-01-21T18:00:00Z"),
                record("late", "c.md", "md", "2025-01-21T18:00:00Z"),
            ],
            &PlotConfig::default(),
        )
    }

    fn ids(commits: &[&Commit]) -> Vec<String> {
        commits.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_starts_with_everything_in_view() {
        let ctx = context();
        assert_eq!(ctx.cursor(), 100.0);
        assert_eq!(ids(&ctx.filtered()), vec!["early", "mid", "late"]);
        assert!(ctx.selection().is_empty());
    }

    #[test]
    fn test_cursor_narrows_and_clears_selection() {
        let mut ctx = context();
        ctx.brush(Some(Region::new((0.0, 0.0), (1000.0, 600.0))));
        assert_eq!(ctx.selected_commits().len(), 3);

        ctx.set_cursor(50.0);
        assert_eq!(ids(&ctx.filtered()), vec!["early", "mid"]);
        assert!(ctx.selected_commits().is_empty());

        ctx.set_cursor(0.0);
        assert_eq!(ids(&ctx.filtered()), vec!["early"]);
    }

    #[test]
    fn test_set_cutoff_moves_cursor() {
        let mut ctx = context();
        let mid = ctx.commits()[1].datetime.unwrap();
        ctx.set_cutoff(mid);
        assert!((ctx.cursor() - 50.0).abs() < 1e-9);
        assert_eq!(ctx.filtered().len(), 2);
    }

    #[test]
    fn test_brush_drives_breakdown() {
        let mut ctx = context();
        let all = ctx.breakdown();
        assert_eq!(all.total_lines, 6);

        let (x, y) = ctx.projection().project(&ctx.commits()[2]).unwrap();
        ctx.brush(Some(Region::new((x, y), (x, y))));
        assert_eq!(ids(&ctx.selected_commits()), vec!["late"]);

        let picked = ctx.breakdown();
        assert_eq!(picked.total_lines, 3);
        assert_eq!(picked.get("md").unwrap().count, 2);
        assert!(ctx.is_selected(&ctx.commits()[2]));

        ctx.clear_selection();
        assert_eq!(ctx.breakdown().total_lines, 6);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut ctx = context();
        let (x, y) = ctx.projection().project(&ctx.commits()[0]).unwrap();
        let region = Region::new((x - 1.0, y - 1.0), (x + 1.0, y + 1.0));
        ctx.toggle(region);
        assert_eq!(ids(&ctx.selected_commits()), vec!["early"]);
        ctx.toggle(region);
        assert!(ctx.selected_commits().is_empty());
    }

    #[test]
    fn test_file_groups_sorted_and_summary() {
        let ctx = context();
        let groups = ctx.file_groups();
        let names: Vec<_> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["a.js", "c.md", "b.css"]);

        let summary = ctx.summary();
        assert_eq!(summary.total_commits, 3);
        assert_eq!(summary.total_loc, 6);
    }

    #[test]
    fn test_draw_order_largest_first() {
        let ctx = context();
        assert_eq!(ids(&ctx.draw_order()), vec!["late", "early", "mid"]);
    }

    #[test]
    fn test_commit_window() {
        let ctx = context();
        let window = ScrollWindow::new(1.0, 2);
        assert_eq!(ids(&ctx.commit_window(&window, 0.0)), vec!["early", "mid"]);
        assert_eq!(ids(&ctx.commit_window(&window, 9.0)), vec!["mid", "late"]);
    }

    #[test]
    fn test_empty_dataset() {
        let mut ctx = MetaContext::from_records(Vec::new(), &PlotConfig::default());
        assert!(ctx.filtered().is_empty());
        assert!(ctx.cutoff().is_none());
        ctx.set_cursor(30.0);
        ctx.brush(Some(Region::new((0.0, 0.0), (1000.0, 600.0))));
        assert!(ctx.selected_commits().is_empty());
        assert!(ctx.breakdown().is_empty());
        assert!(ctx.file_groups().is_empty());
    }

    #[test]
    fn test_scenario_counts() {
        let ctx = MetaContext::from_records(two_commit_records(), &PlotConfig::default());
        let breakdown = ctx.breakdown();
        assert_eq!(breakdown.get("js").unwrap().proportion, 0.4);
        assert_eq!(breakdown.get("css").unwrap().proportion, 0.6);
    }
}
