//! Variable tree styling configuration.
//!
//! Provides distinct styles for scope headers, bands, notes and the cursor row.

use crate::state::{Row, RowKind};
use ratatui::style::{Color, Modifier, Style};

/// Style for muted text (hints, notes).
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Style for section headers in overlays.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on or off regardless of environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== TreeStyles =====

/// Styles for the variables table.
///
/// Without colors only modifiers remain, so the cursor stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStyles {
    /// `Locals` / `Globals` rows.
    pub scope: Style,
    /// Band rows such as `[100-199]`.
    pub band: Style,
    /// Placeholder and empty-scope rows.
    pub note: Style,
    /// Type column.
    pub type_column: Style,
    /// Name/Value/Type header.
    pub table_header: Style,
    /// Panel border.
    pub border: Style,
    /// Highlight applied on top of the cursor row.
    pub cursor: Style,
}

impl TreeStyles {
    /// Create styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                scope: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                band: Style::default().fg(Color::Magenta),
                note: MUTED_TEXT.add_modifier(Modifier::ITALIC),
                type_column: Style::default().fg(Color::Green),
                table_header: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                border: Style::default().fg(Color::Cyan),
                cursor: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                scope: Style::default().add_modifier(Modifier::BOLD),
                band: Style::default(),
                note: Style::default().add_modifier(Modifier::ITALIC),
                type_column: Style::default(),
                table_header: Style::default().add_modifier(Modifier::BOLD),
                border: Style::default(),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    /// Base style of a row before cursor highlighting.
    pub fn for_row(&self, row: &Row) -> Style {
        match row.kind {
            RowKind::ScopeHeader => self.scope,
            RowKind::Note => self.note,
            RowKind::Node if row.is_band() => self.band,
            RowKind::Node => Style::default(),
        }
    }
}

impl Default for TreeStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
