//! Tests for the TUI application shell.

use super::test_support::buffer_to_string;
use super::*;
use crate::inspect::InspectOptions;
use crate::model::{BandSize, Value};
use crate::snapshot::Snapshot;
use crossterm::event::KeyModifiers;
use ratatui::backend::TestBackend;

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn create_test_app(width: u16, height: u16) -> TuiApp<TestBackend> {
    let snapshot = Snapshot::new()
        .with_location("test_segmented_display.py", 53)
        .with_local("small_list", Value::int_range(0, 50))
        .with_local("large_list", Value::int_range(0, 250))
        .with_global("answer", Value::Int(42));
    let state = AppState::new(snapshot, InspectOptions::default());
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    TuiApp::with_terminal(
        terminal,
        state,
        TreeStyles::with_color_config(ColorConfig::fixed(false)),
    )
}

fn screen(app: &TuiApp<TestBackend>) -> String {
    buffer_to_string(app.terminal().backend().buffer())
}

#[test]
fn tui_error_from_io_error() {
    let err: TuiError = io::Error::other("test error").into();
    assert!(matches!(err, TuiError::Io(_)));
}

#[test]
fn handle_key_q_returns_true() {
    let mut app = create_test_app(80, 20);
    assert!(app.handle_key(key('q')));
}

#[test]
fn handle_key_ctrl_c_returns_true() {
    let mut app = create_test_app(80, 20);
    assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn handle_key_other_returns_false() {
    let mut app = create_test_app(80, 20);
    assert!(!app.handle_key(key('x')));
}

#[test]
fn draw_shows_title_header_and_variables() {
    let mut app = create_test_app(80, 20);
    app.draw().unwrap();

    let text = screen(&app);
    assert!(text.contains("test_segmented_display.py:53"));
    assert!(text.contains("Name"));
    assert!(text.contains("Value"));
    assert!(text.contains("Type"));
    assert!(text.contains("▾ Locals"));
    assert!(text.contains("▸ large_list"));
    assert!(text.contains("[...] (250 items)"));
    assert!(text.contains("▸ Globals"));
    assert!(text.contains("1/4"));
}

#[test]
fn enter_on_large_list_renders_bands() {
    let mut app = create_test_app(80, 20);
    app.handle_key(key('j'));
    app.handle_key(key('j'));
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    app.draw().unwrap();

    let text = screen(&app);
    assert!(text.contains("▾ large_list"));
    assert!(text.contains("▸ [0-99]"));
    assert!(text.contains("▸ [100-199]"));
    assert!(text.contains("▸ [200-249]"));
    assert!(text.contains("(50 items)"));
    assert!(text.contains("segment"));
}

#[test]
fn small_list_has_no_bands() {
    let mut app = create_test_app(80, 70);
    app.handle_key(key('j'));
    app.handle_key(key('l'));
    app.draw().unwrap();

    let text = screen(&app);
    assert!(text.contains("[49]"));
    assert!(!text.contains("[0-49]"));
}

#[test]
fn scrolling_keeps_cursor_visible() {
    let mut app = create_test_app(80, 12);
    // Open large_list and its first band: 100 more rows than fit.
    for c in ['j', 'j', 'l', 'l', 'l'] {
        app.handle_key(key(c));
    }
    app.handle_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
    app.draw().unwrap();

    let text = screen(&app);
    assert!(text.contains("Globals"));
    assert!(!text.contains("▾ Locals"));
    assert!(app.app_state().tree.scroll_offset() > 0);
}

#[test]
fn help_overlay_opens_and_closes_with_escape() {
    let mut app = create_test_app(80, 30);
    app.handle_key(key('?'));
    assert!(app.app_state().help_visible);
    app.draw().unwrap();
    assert!(screen(&app).contains("Keyboard Shortcuts"));

    app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert!(!app.app_state().help_visible);
}

#[test]
fn help_overlay_blocks_tree_actions() {
    let mut app = create_test_app(80, 30);
    app.handle_key(key('j'));
    app.handle_key(key('?'));
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    app.handle_key(key('?'));

    assert_eq!(app.app_state().rows().len(), 4);
}

#[test]
fn status_bar_shows_band_size() {
    let snapshot = Snapshot::new().with_local("x", Value::int_range(0, 10));
    let options = InspectOptions::with_band_size(BandSize::new(3).unwrap());
    let terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
    let mut app = TuiApp::with_terminal(
        terminal,
        AppState::new(snapshot, options).with_source_name("<stdin>"),
        TreeStyles::with_color_config(ColorConfig::fixed(false)),
    );
    app.handle_key(key('j'));
    app.handle_key(key('l'));
    app.draw().unwrap();

    let text = screen(&app);
    assert!(text.contains("<stdin>"));
    assert!(text.contains("band size 3"));
    assert!(text.contains("[9-9]"));
}
