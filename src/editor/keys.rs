//! Key bindings for the editing surface.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::document::{Mark, Movement};
use crate::hotkey::{Hotkey, ModKey};

/// Mark hotkeys, checked in order.
pub const MARK_HOTKEYS: [(Hotkey, Mark); 4] = [
    (Hotkey::key(KeyCode::Char('b')).with_mod(), Mark::Bold),
    (Hotkey::key(KeyCode::Char('i')).with_mod(), Mark::Italic),
    (Hotkey::key(KeyCode::Char('u')).with_mod(), Mark::Underlined),
    (Hotkey::key(KeyCode::Char('`')).with_mod(), Mark::Code),
];

pub const UNDO: Hotkey = Hotkey::key(KeyCode::Char('z')).with_mod();
pub const REDO: Hotkey = Hotkey::key(KeyCode::Char('z')).with_mod().with_shift();
pub const REDO_ALT: Hotkey = Hotkey::key(KeyCode::Char('y')).with_mod();

/// Default editing behavior for a key the hotkey handler did not take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAction {
    Insert(char),
    SplitBlock,
    DeleteBackward,
    DeleteForward,
    Move { movement: Movement, extend: bool },
    SelectAll,
    Undo,
    Redo,
}

/// Resolves key events against the bindings for one "mod" key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keymap {
    mod_key: ModKey,
}

impl Keymap {
    pub const fn new(mod_key: ModKey) -> Self {
        Self { mod_key }
    }

    pub const fn mod_key(&self) -> ModKey {
        self.mod_key
    }

    /// The mark whose hotkey `event` is, if any.
    pub fn mark_for(&self, event: &KeyEvent) -> Option<Mark> {
        MARK_HOTKEYS
            .iter()
            .find(|(hotkey, _)| hotkey.matches(event, self.mod_key))
            .map(|&(_, mark)| mark)
    }

    /// The default surface action for `event`.
    pub fn surface_action(&self, event: &KeyEvent) -> Option<SurfaceAction> {
        if UNDO.matches(event, self.mod_key) {
            return Some(SurfaceAction::Undo);
        }
        if REDO.matches(event, self.mod_key) || REDO_ALT.matches(event, self.mod_key) {
            return Some(SurfaceAction::Redo);
        }

        let mods = event.modifiers;
        let ctrl = mods.contains(KeyModifiers::CONTROL);
        let extend = mods.contains(KeyModifiers::SHIFT);
        let movement = |movement| Some(SurfaceAction::Move { movement, extend });
        match event.code {
            KeyCode::Char('a') if ctrl => Some(SurfaceAction::SelectAll),
            KeyCode::Char(c)
                if !ctrl
                    && !mods.intersects(KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                Some(SurfaceAction::Insert(c))
            }
            KeyCode::Enter => Some(SurfaceAction::SplitBlock),
            KeyCode::Backspace => Some(SurfaceAction::DeleteBackward),
            KeyCode::Delete => Some(SurfaceAction::DeleteForward),
            KeyCode::Left => movement(Movement::Left),
            KeyCode::Right => movement(Movement::Right),
            KeyCode::Up => movement(Movement::Up),
            KeyCode::Down => movement(Movement::Down),
            KeyCode::Home if ctrl => movement(Movement::DocumentStart),
            KeyCode::End if ctrl => movement(Movement::DocumentEnd),
            KeyCode::Home => movement(Movement::LineStart),
            KeyCode::End => movement(Movement::LineEnd),
            _ => None,
        }
    }
}
