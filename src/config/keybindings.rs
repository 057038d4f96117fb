//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings alongside arrow keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Every key bound to `action`, for the help overlay.
    pub fn keys_for(&self, action: KeyAction) -> Vec<KeyEvent> {
        let mut keys: Vec<KeyEvent> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|key| format!("{:?}", key.code));
        keys
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Vim-style cursor movement
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::CursorDown);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::CursorUp);
        keys.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::CursorToTop);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::CursorToBottom);

        // Arrow keys
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::CursorDown);
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::CursorUp);
        keys.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::CursorToTop);
        keys.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::CursorToBottom);

        // Page navigation
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        keys.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);

        // Tree interaction
        keys.bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::ToggleExpand);
        keys.bind(KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::ToggleExpand);
        keys.bind(KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::Expand);
        keys.bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::Expand);
        keys.bind(KeyCode::Char('h'), KeyModifiers::NONE, KeyAction::Collapse);
        keys.bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::Collapse);
        keys.bind(KeyCode::Char('c'), KeyModifiers::NONE, KeyAction::CollapseAll);

        // Application controls
        keys.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        keys.bind(KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::Help);

        keys
    }
}
