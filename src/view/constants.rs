//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for layout-related values so text output and the
//! TUI draw trees the same way.

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Lines taken by the variables panel border (top + bottom).
pub const PANEL_BORDER_HEIGHT: u16 = 2;

/// Lines taken by the Name/Value/Type header row.
pub const TABLE_HEADER_HEIGHT: u16 = 1;

/// Width percentage of the Name column.
pub const NAME_COLUMN_PERCENT: u16 = 40;

/// Width percentage of the Value column.
pub const VALUE_COLUMN_PERCENT: u16 = 40;

/// Width percentage of the Type column.
pub const TYPE_COLUMN_PERCENT: u16 = 20;

/// Spaces of indentation per tree level.
pub const INDENT_WIDTH: usize = 2;

/// Marker for an open node.
pub const EXPANDED_MARKER: char = '▾';

/// Marker for a closed node.
pub const COLLAPSED_MARKER: char = '▸';

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 60;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 70;

/// Marker text for a node: open, closed, or a blank for leaves.
pub fn marker(expandable: bool, expanded: bool) -> char {
    match (expandable, expanded) {
        (true, true) => EXPANDED_MARKER,
        (true, false) => COLLAPSED_MARKER,
        (false, _) => ' ',
    }
}
