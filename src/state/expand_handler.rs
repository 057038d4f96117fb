//! Tree navigation and expand/collapse keyboard action handler.
//!
//! Pure functions that transform AppState in response to key actions.

use super::rows::Row;
use super::tree_state::NodePath;
use crate::model::KeyAction;
use crate::state::AppState;
use tracing::debug;

/// Handle a cursor or expand/collapse action.
///
/// # Arguments
/// * `state` - Current application state to transform
/// * `action` - The action to handle
/// * `viewport_height` - Visible rows, used for paging and scroll-follow
///
/// Actions that are not tree actions leave the state unchanged. Rows are
/// flattened once per call, and again only when the action opened or closed a
/// node.
pub fn handle_tree_action(state: &mut AppState, action: KeyAction, viewport_height: usize) {
    let rows = state.rows();
    if rows.is_empty() {
        return;
    }

    let cursor = state.tree.cursor().min(rows.len() - 1);
    let page = viewport_height.max(1);
    let mut tree_changed = false;
    let mut collapsed_scope = None;

    match action {
        KeyAction::CursorUp => state.tree.set_cursor(cursor.saturating_sub(1), rows.len()),
        KeyAction::CursorDown => state.tree.set_cursor(cursor + 1, rows.len()),
        KeyAction::PageUp => state.tree.set_cursor(cursor.saturating_sub(page), rows.len()),
        KeyAction::PageDown => state.tree.set_cursor(cursor + page, rows.len()),
        KeyAction::CursorToTop => state.tree.set_cursor(0, rows.len()),
        KeyAction::CursorToBottom => state.tree.set_cursor(rows.len() - 1, rows.len()),
        KeyAction::ToggleExpand => {
            let row = &rows[cursor];
            if row.expandable {
                let now_open = state.tree.toggle(&row.path);
                debug!(path = %row.path, expanded = now_open, "toggled node");
                tree_changed = true;
            }
        }
        KeyAction::Expand => {
            let row = &rows[cursor];
            if row.expandable && !row.expanded {
                state.tree.expand(row.path.clone());
                tree_changed = true;
            } else if row.expanded && has_child_row(&rows, cursor) {
                state.tree.set_cursor(cursor + 1, rows.len());
            }
        }
        KeyAction::Collapse => {
            let row = &rows[cursor];
            if row.expanded {
                state.tree.collapse(&row.path);
                tree_changed = true;
            } else if let Some(parent) = parent_row(&rows, cursor) {
                state.tree.set_cursor(parent, rows.len());
            }
        }
        KeyAction::CollapseAll => {
            collapsed_scope = Some(rows[cursor].path.scope_of());
            state.tree.collapse_all();
            tree_changed = true;
        }
        _ => {}
    }

    let rows = if tree_changed { state.rows() } else { rows };
    if let Some(scope) = collapsed_scope {
        let header = rows
            .iter()
            .position(|row| row.path == NodePath::scope(scope))
            .unwrap_or(0);
        state.tree.set_cursor(header, rows.len());
    }

    let cursor = state.tree.cursor();
    state.tree.set_cursor(cursor, rows.len());
    state.tree.scroll_to_cursor(page);
}

fn has_child_row(rows: &[Row], index: usize) -> bool {
    rows.get(index + 1)
        .is_some_and(|next| next.depth > rows[index].depth)
}

/// Index of the nearest row above `index` with a smaller depth.
fn parent_row(rows: &[Row], index: usize) -> Option<usize> {
    let depth = rows[index].depth;
    rows[..index].iter().rposition(|row| row.depth < depth)
}

// ===== Tests =====

#[cfg(test)]
#[path = "expand_handler_tests.rs"]
mod tests;
