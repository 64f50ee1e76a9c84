use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::context::MetaContext;

use super::layout::cell_to_plot;
use super::state::{TuiState, ViewMode};

mod actions;

use actions::*;

/// Handle a keyboard event, returning `true` if the loop should exit.
pub fn handle_key_event(
    key_event: KeyEvent,
    state: &mut TuiState,
    ctx: &mut MetaContext,
    repo_url: Option<&str>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1)) {
            state.show_help = false;
        }
        return false;
    }

    if state.brush.is_some() {
        handle_brush_key(key_event.code, state, ctx);
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Tab => state.next_view(),
        KeyCode::BackTab => state.prev_view(),
        KeyCode::Char('[') => move_cursor(state, ctx, -1.0),
        KeyCode::Char(']') => move_cursor(state, ctx, 1.0),
        KeyCode::Char('{') => move_cursor(state, ctx, -10.0),
        KeyCode::Char('}') => move_cursor(state, ctx, 10.0),
        KeyCode::Home => set_cursor(state, ctx, 0.0),
        KeyCode::End => set_cursor(state, ctx, 100.0),
        KeyCode::Char('b') => begin_keyboard_brush(state, ctx, false),
        KeyCode::Char('t') => begin_keyboard_brush(state, ctx, true),
        KeyCode::Esc => clear_selection(state, ctx),
        KeyCode::Char('c') => copy_commit_id(state, ctx),
        KeyCode::Char('y') => copy_commit_url(state, ctx, repo_url),
        KeyCode::Up | KeyCode::Char('k') => scroll(state, ctx, -1),
        KeyCode::Down | KeyCode::Char('j') => scroll(state, ctx, 1),
        KeyCode::PageUp => scroll(state, ctx, -10),
        KeyCode::PageDown => scroll(state, ctx, 10),
        _ => {}
    }

    false
}

fn handle_brush_key(code: KeyCode, state: &mut TuiState, ctx: &mut MetaContext) {
    match code {
        KeyCode::Esc => cancel_brush(state, ctx),
        KeyCode::Enter => apply_brush(state, ctx),
        KeyCode::Left => nudge_brush(state, ctx, -1.0, 0.0),
        KeyCode::Right => nudge_brush(state, ctx, 1.0, 0.0),
        KeyCode::Up => nudge_brush(state, ctx, 0.0, -1.0),
        KeyCode::Down => nudge_brush(state, ctx, 0.0, 1.0),
        _ => {}
    }
}

fn scroll(state: &mut TuiState, ctx: &MetaContext, rows: isize) {
    match state.view_mode {
        ViewMode::Files => scroll_files(state, ctx, rows as f64),
        _ => move_commit(state, ctx, rows),
    }
}

/// Drag on the chart to brush (Shift or Ctrl to toggle); the wheel scrolls lists.
pub fn handle_mouse_event(mouse_event: MouseEvent, state: &mut TuiState, ctx: &mut MetaContext) {
    let point = cell_to_plot(
        state.chart_area,
        ctx.projection().area(),
        mouse_event.column,
        mouse_event.row,
    );

    match mouse_event.kind {
        MouseEventKind::ScrollUp => scroll(state, ctx, -1),
        MouseEventKind::ScrollDown => scroll(state, ctx, 1),
        MouseEventKind::Down(MouseButton::Left) if state.view_mode == ViewMode::Commits => {
            if let Some(point) = point {
                let toggle = mouse_event
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::CONTROL);
                begin_brush(state, ctx, point, toggle);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(point) = point {
                extend_brush(state, ctx, point);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(point) = point {
                extend_brush(state, ctx, point);
            }
            apply_brush(state, ctx);
        }
        _ => {}
    }
}
