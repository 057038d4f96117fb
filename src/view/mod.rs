//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
pub mod styles;
pub mod text;
mod variables;

pub use help::render_help_overlay;
pub use styles::{ColorConfig, TreeStyles};
pub use text::{render_json, render_text, JsonReport};
pub use variables::{name_cell_text, render_variables, truncate_to_width};

use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{AppError, KeyAction};
use crate::source::InputSource;
use crate::state::{expand_handler, AppState, Row, TreeState};
use constants::{PANEL_BORDER_HEIGHT, STATUS_BAR_HEIGHT, TABLE_HEADER_HEIGHT};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: TreeStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, styles: TreeStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, app_state, styles))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). The snapshot never changes, so
    /// the screen is redrawn only after input or a resize.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(250);

        self.draw()?;

        loop {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    self.draw()?;
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    self.draw()?;
                }
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an already initialised terminal.
    pub fn with_terminal(terminal: Terminal<B>, app_state: AppState, styles: TreeStyles) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            styles,
        }
    }

    /// Current application state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// The terminal, for inspecting a test backend's buffer.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Escape closes help overlay if visible (before key binding dispatch)
        if key.code == KeyCode::Esc && self.app_state.help_visible {
            self.app_state.help_visible = false;
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        if self.app_state.help_visible && !action.allowed_with_help() {
            return false;
        }

        match action {
            KeyAction::Quit => true,
            KeyAction::Help => {
                self.app_state.toggle_help();
                false
            }
            _ => {
                let height = self.viewport_height();
                expand_handler::handle_tree_action(&mut self.app_state, action, height);
                false
            }
        }
    }

    /// Rows available for the tree body in the current terminal.
    fn viewport_height(&self) -> usize {
        let height = self
            .terminal
            .size()
            .map(|size| size.height)
            .unwrap_or_default();
        usize::from(
            height
                .saturating_sub(STATUS_BAR_HEIGHT)
                .saturating_sub(PANEL_BORDER_HEIGHT)
                .saturating_sub(TABLE_HEADER_HEIGHT),
        )
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let height = self.viewport_height();
        self.app_state.tree.scroll_to_cursor(height);

        let rows = self.app_state.rows();
        let state = &self.app_state;
        let styles = &self.styles;

        self.terminal.draw(|frame| {
            render_layout(frame, state, &rows, styles);
        })?;

        Ok(())
    }
}

/// Lay out the variables panel, the status bar and the optional help overlay.
pub fn render_layout(frame: &mut Frame, state: &AppState, rows: &[Row], styles: &TreeStyles) {
    let chunks = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .split(frame.area());

    render_variables(frame, chunks[0], state, rows, styles);
    render_status_bar(frame, chunks[1], state, rows);

    if state.help_visible {
        render_help_overlay(frame);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, rows: &[Row]) {
    let position = if rows.is_empty() {
        "0/0".to_string()
    } else {
        format!("{}/{}", state.tree.cursor() + 1, rows.len())
    };
    let line = Line::from(vec![
        Span::raw(format!(" {position}")),
        Span::styled(
            format!("  band size {}  ? help  q quit", state.options.band_size),
            styles::MUTED_TEXT,
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Initialize and run the TUI application for a snapshot input
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    input_source: InputSource,
    config: &ResolvedConfig,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let snapshot = input_source.read_snapshot()?;
    info!(
        source = %input_source,
        locals = snapshot.scope(crate::snapshot::Scope::Locals).len(),
        globals = snapshot.scope(crate::snapshot::Scope::Globals).len(),
        "starting TUI"
    );

    let app_state = AppState::new(snapshot, config.inspect_options())
        .with_source_name(input_source.display_name())
        .with_tree(TreeState::new(config.show_globals));

    let mut app = TuiApp::new(app_state, TreeStyles::with_color_config(colors))?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}


#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
