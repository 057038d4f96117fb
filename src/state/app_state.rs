//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. The snapshot is
//! immutable; only tree expansion, cursor and overlays change.

use super::rows::{flatten, Row};
use super::tree_state::TreeState;
use crate::inspect::InspectOptions;
use crate::snapshot::Snapshot;

// ===== AppState =====

/// Application state. Pure data, no side effects.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The captured variables being inspected.
    snapshot: Snapshot,

    /// Fallback title when the snapshot records no location.
    source_name: String,

    /// Band size and attribute filter applied at every level.
    pub options: InspectOptions,

    /// Expansion, cursor and scroll state.
    pub tree: TreeState,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,
}

impl AppState {
    /// Create new AppState with the default tree state.
    pub fn new(snapshot: Snapshot, options: InspectOptions) -> Self {
        Self {
            snapshot,
            source_name: String::new(),
            options,
            tree: TreeState::default(),
            help_visible: false,
        }
    }

    /// Set the title used when the snapshot has no recorded location.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Replace the initial tree state.
    pub fn with_tree(mut self, tree: TreeState) -> Self {
        self.tree = tree;
        self
    }

    /// The snapshot being inspected.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Panel title: `file:line` or the input name.
    pub fn title(&self) -> String {
        self.snapshot
            .location()
            .unwrap_or_else(|| self.source_name.clone())
    }

    /// Currently visible rows.
    pub fn rows(&self) -> Vec<Row> {
        flatten(&self.snapshot, &self.tree, self.options)
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    #[test]
    fn title_prefers_snapshot_location() {
        let snapshot = Snapshot::new().with_location("script.py", 12);
        let state = AppState::new(snapshot, InspectOptions::default()).with_source_name("x.json");
        assert_eq!(state.title(), "script.py:12");
    }

    #[test]
    fn title_falls_back_to_source_name() {
        let state =
            AppState::new(Snapshot::new(), InspectOptions::default()).with_source_name("<stdin>");
        assert_eq!(state.title(), "<stdin>");
    }

    #[test]
    fn rows_follow_tree_state() {
        let snapshot = Snapshot::new().with_global("g", Value::Int(1));
        let closed = AppState::new(snapshot.clone(), InspectOptions::default());
        let open = AppState::new(snapshot, InspectOptions::default()).with_tree(TreeState::new(true));

        assert_eq!(closed.rows().len(), 3);
        assert_eq!(open.rows().len(), 4);
    }

    #[test]
    fn help_toggles() {
        let mut state = AppState::new(Snapshot::new(), InspectOptions::default());
        state.toggle_help();
        assert!(state.help_visible);
        state.toggle_help();
        assert!(!state.help_visible);
    }
}
