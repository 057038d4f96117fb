//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod expand_handler;
pub mod rows;
pub mod tree_state;

// Re-export for convenience
pub use app_state::AppState;
pub use expand_handler::handle_tree_action;
pub use rows::{flatten, Row, RowKind};
pub use tree_state::{NodePath, PathStep, TreeState};
