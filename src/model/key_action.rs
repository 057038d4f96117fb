//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Cursor movement
    /// Move the cursor to the previous row. Default: k/↑
    CursorUp,
    /// Move the cursor to the next row. Default: j/↓
    CursorDown,
    /// Move the cursor up by one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Move the cursor down by one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the first row. Default: g/Home
    CursorToTop,
    /// Jump to the last row. Default: G/End
    CursorToBottom,

    // Tree interaction
    /// Toggle the node under the cursor. Default: Enter/Space
    ToggleExpand,
    /// Expand the node under the cursor, or step into its first child. Default: l/→
    Expand,
    /// Collapse the node under the cursor, or step out to its parent. Default: h/←
    Collapse,
    /// Collapse every node below the scope headers. Default: c
    CollapseAll,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
}

impl KeyAction {
    /// Actions that stay enabled while the help overlay is open.
    pub fn allowed_with_help(self) -> bool {
        matches!(
            self,
            KeyAction::Help
                | KeyAction::Quit
                | KeyAction::CursorUp
                | KeyAction::CursorDown
                | KeyAction::PageUp
                | KeyAction::PageDown
        )
    }
}
