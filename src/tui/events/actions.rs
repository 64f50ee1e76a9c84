use crate::context::MetaContext;
use crate::window::ScrollWindow;

use super::super::input::copy_to_clipboard;
use super::super::state::{listed_commits, Brush, TuiState};

/// Fraction of the plot a keyboard step moves the brush edge.
const BRUSH_STEP: f64 = 0.02;

/// Move the time cursor by `delta` percent. The selection is dropped with it.
pub(super) fn move_cursor(state: &mut TuiState, ctx: &mut MetaContext, delta: f64) {
    set_cursor(state, ctx, ctx.cursor() + delta);
}

pub(super) fn set_cursor(state: &mut TuiState, ctx: &mut MetaContext, percent: f64) {
    ctx.set_cursor(percent);
    state.brush = None;
    state.brush_base = None;
    state.commit_selected = 0;
    state.files_offset = 0.0;
}

pub(super) fn begin_brush(
    state: &mut TuiState,
    ctx: &MetaContext,
    point: (f64, f64),
    toggle: bool,
) {
    state.brush = Some(Brush {
        anchor: point,
        extent: point,
        toggle,
    });
    state.brush_base = Some(ctx.selection().clone());
}

pub(super) fn extend_brush(state: &mut TuiState, ctx: &mut MetaContext, point: (f64, f64)) {
    if let Some(brush) = state.brush.as_mut() {
        brush.extent = point;
    }
    preview_brush(state, ctx);
}

/// Start a keyboard brush in the middle of the plot.
pub(super) fn begin_keyboard_brush(state: &mut TuiState, ctx: &MetaContext, toggle: bool) {
    let area = ctx.projection().area();
    let centre = (
        area.left + area.width() / 2.0,
        area.top + area.height() / 2.0,
    );
    begin_brush(state, ctx, centre, toggle);
}

/// Grow the brush extent by whole steps, kept inside the plot.
pub(super) fn nudge_brush(state: &mut TuiState, ctx: &mut MetaContext, dx: f64, dy: f64) {
    let area = ctx.projection().area();
    if let Some(brush) = state.brush.as_mut() {
        let (x, y) = brush.extent;
        brush.extent = (
            (x + dx * BRUSH_STEP * area.width()).clamp(area.left, area.right),
            (y + dy * BRUSH_STEP * area.height()).clamp(area.top, area.bottom),
        );
    }
    preview_brush(state, ctx);
}

/// Recompute the selection for the brush as it stands. Toggles start over
/// from the selection taken when the brush began, so a commit flips at most
/// once per drag. A click without a drag clears a plain brush and leaves a
/// toggle with nothing to flip.
fn preview_brush(state: &TuiState, ctx: &mut MetaContext) {
    let Some(brush) = state.brush else {
        return;
    };
    let region = brush.region();
    let empty = brush.anchor == brush.extent;

    if brush.toggle {
        if let Some(base) = &state.brush_base {
            ctx.restore_selection(base.clone());
        }
        if !empty {
            ctx.toggle(region);
        }
    } else if empty {
        ctx.brush(None);
    } else {
        ctx.brush(Some(region));
    }
}

/// Commit the pending brush.
pub(super) fn apply_brush(state: &mut TuiState, ctx: &mut MetaContext) {
    if state.brush.is_none() {
        return;
    }
    preview_brush(state, ctx);
    state.brush = None;
    state.brush_base = None;
    state.commit_selected = 0;

    let n = ctx.selection().len();
    if n > 0 {
        state.set_status(format!("{n} commits selected"));
    }
}

/// Drop the pending brush and put the earlier selection back.
pub(super) fn cancel_brush(state: &mut TuiState, ctx: &mut MetaContext) {
    state.brush = None;
    if let Some(base) = state.brush_base.take() {
        ctx.restore_selection(base);
    }
}

pub(super) fn clear_selection(state: &mut TuiState, ctx: &mut MetaContext) {
    state.brush = None;
    state.brush_base = None;
    ctx.clear_selection();
    state.commit_selected = 0;
}

pub(super) fn move_commit(state: &mut TuiState, ctx: &MetaContext, delta: isize) {
    let len = listed_commits(ctx).len();
    if len == 0 {
        state.commit_selected = 0;
        return;
    }
    let next = state.commit_selected as isize + delta;
    state.commit_selected = next.clamp(0, len as isize - 1) as usize;
}

/// Scroll the file list by `rows`, clamped so the window stays full.
pub(super) fn scroll_files(state: &mut TuiState, ctx: &MetaContext, rows: f64) {
    let total = ctx.file_groups().len();
    let window = ScrollWindow::new(1.0, state.files_visible);
    let last = total.saturating_sub(state.files_visible) as f64;
    let start = window.start_index(total, state.files_offset) as f64;
    state.files_offset = (start + rows).clamp(0.0, last);
}

pub(super) fn copy_commit_id(state: &mut TuiState, ctx: &MetaContext) {
    let listed = listed_commits(ctx);
    let Some(commit) = listed.get(state.commit_selected) else {
        return;
    };
    match copy_to_clipboard(&commit.id) {
        Ok(_) => state.set_status(format!("Copied: {}", commit.short_id())),
        Err(err) => state.set_status(format!("Clipboard error: {err}")),
    }
}

pub(super) fn copy_commit_url(state: &mut TuiState, ctx: &MetaContext, repo_url: Option<&str>) {
    let Some(base) = repo_url else {
        state.set_status("No --repo-url given");
        return;
    };
    let listed = listed_commits(ctx);
    let Some(commit) = listed.get(state.commit_selected) else {
        return;
    };
    let url = commit.url(base);
    match copy_to_clipboard(&url) {
        Ok(_) => state.set_status(format!("Copied: {url}")),
        Err(err) => state.set_status(format!("Clipboard error: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotConfig;
    use crate::selection::Region;
    use crate::testutil::record;

    fn context() -> MetaContext {
        MetaContext::from_records(
            vec![
                record("a1", "a.js", "js", "2025-01-01T06:00:00Z"),
                record("b2", "b.css", "css", "2025-01-11T12:00:00Z"),
                record("c3", "c.md", "md", "2025-01-21T18:00:00Z"),
            ],
            &PlotConfig::default(),
        )
    }

    #[test]
    fn test_click_without_drag_clears() {
        let mut ctx = context();
        let mut state = TuiState::default();
        let area = ctx.projection().area();

        begin_brush(&mut state, &ctx, (area.left, area.top), false);
        extend_brush(&mut state, &mut ctx, (area.right, area.bottom));
        apply_brush(&mut state, &mut ctx);
        assert_eq!(ctx.selection().len(), 3);
        assert!(state.brush.is_none());

        begin_brush(&mut state, &ctx, (5.0, 5.0), false);
        apply_brush(&mut state, &mut ctx);
        assert!(ctx.selection().is_empty());
    }

    #[test]
    fn test_toggle_brush_flips_membership() {
        let mut ctx = context();
        let mut state = TuiState::default();
        let (x, y) = ctx.projection().project(&ctx.commits()[1]).unwrap();

        begin_brush(&mut state, &ctx, (x - 1.0, y - 1.0), true);
        extend_brush(&mut state, &mut ctx, (x + 1.0, y + 1.0));
        apply_brush(&mut state, &mut ctx);
        assert_eq!(ctx.selection().len(), 1);

        begin_brush(&mut state, &ctx, (x - 1.0, y - 1.0), true);
        extend_brush(&mut state, &mut ctx, (x + 1.0, y + 1.0));
        apply_brush(&mut state, &mut ctx);
        assert!(ctx.selection().is_empty());
    }

    #[test]
    fn test_selection_follows_brush_while_dragging() {
        let mut ctx = context();
        let mut state = TuiState::default();
        let area = ctx.projection().area();

        begin_brush(&mut state, &ctx, (area.left, area.top), false);
        extend_brush(&mut state, &mut ctx, (area.right, area.bottom));
        assert_eq!(ctx.selection().len(), 3);
        assert!(state.brush.is_some());

        // shrinking back past the last two commits drops them again
        let (x, _) = ctx.projection().project(&ctx.commits()[0]).unwrap();
        extend_brush(&mut state, &mut ctx, (x + 1.0, area.bottom));
        assert_eq!(ctx.selection().len(), 1);
        assert!(ctx.is_selected(&ctx.commits()[0]));
    }

    #[test]
    fn test_toggle_drag_flips_from_starting_selection() {
        let mut ctx = context();
        let mut state = TuiState::default();
        let (x, y) = ctx.projection().project(&ctx.commits()[1]).unwrap();

        begin_brush(&mut state, &ctx, (x - 1.0, y - 1.0), true);
        for _ in 0..3 {
            extend_brush(&mut state, &mut ctx, (x + 1.0, y + 1.0));
            assert_eq!(ctx.selection().len(), 1);
        }
        extend_brush(&mut state, &mut ctx, (x - 0.5, y - 0.5));
        assert!(ctx.selection().is_empty());
        extend_brush(&mut state, &mut ctx, (x + 2.0, y + 2.0));
        apply_brush(&mut state, &mut ctx);
        assert!(ctx.is_selected(&ctx.commits()[1]));
        assert!(state.brush_base.is_none());
    }

    #[test]
    fn test_cancel_restores_earlier_selection() {
        let mut ctx = context();
        let mut state = TuiState::default();
        let (x, y) = ctx.projection().project(&ctx.commits()[2]).unwrap();
        ctx.brush(Some(Region::new((x - 1.0, y - 1.0), (x + 1.0, y + 1.0))));

        let area = ctx.projection().area();
        begin_brush(&mut state, &ctx, (area.left, area.top), false);
        extend_brush(&mut state, &mut ctx, (area.right, area.bottom));
        assert_eq!(ctx.selection().len(), 3);

        cancel_brush(&mut state, &mut ctx);
        assert_eq!(ctx.selection().len(), 1);
        assert!(ctx.is_selected(&ctx.commits()[2]));
    }

    #[test]
    fn test_keyboard_brush_stays_in_plot() {
        let mut ctx = context();
        let mut state = TuiState::default();
        begin_keyboard_brush(&mut state, &ctx, false);
        for _ in 0..100 {
            nudge_brush(&mut state, &mut ctx, 1.0, -1.0);
        }
        let area = ctx.projection().area();
        assert_eq!(state.brush.unwrap().extent, (area.right, area.top));
    }

    #[test]
    fn test_cursor_resets_lists() {
        let mut ctx = context();
        let mut state = TuiState {
            commit_selected: 2,
            files_offset: 4.0,
            ..TuiState::default()
        };
        move_cursor(&mut state, &mut ctx, -60.0);
        assert_eq!(ctx.cursor(), 40.0);
        assert_eq!(ctx.filtered().len(), 1);
        assert_eq!(state.commit_selected, 0);
        assert_eq!(state.files_offset, 0.0);
    }

    #[test]
    fn test_move_commit_clamps() {
        let ctx = context();
        let mut state = TuiState::default();
        move_commit(&mut state, &ctx, 10);
        assert_eq!(state.commit_selected, 2);
        move_commit(&mut state, &ctx, -10);
        assert_eq!(state.commit_selected, 0);
    }

    #[test]
    fn test_scroll_files_clamps() {
        let ctx = context();
        let mut state = TuiState {
            files_visible: 2,
            ..TuiState::default()
        };
        scroll_files(&mut state, &ctx, 5.0);
        assert_eq!(state.files_offset, 1.0);
        scroll_files(&mut state, &ctx, -5.0);
        assert_eq!(state.files_offset, 0.0);
    }
}
