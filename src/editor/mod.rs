//! The editor surface controller.
//!
//! Owns the current [`Value`], derives toolbar state from it and turns key
//! presses and toolbar clicks into document changes. Every handler commits a
//! whole new value; nothing here edits a value in place.

mod block_toggle;
mod keys;
mod toolbar;

pub use block_toggle::{BlockToggle, ListKind, ListState, plan_block_toggle};
pub use keys::{Keymap, MARK_HOTKEYS, REDO, REDO_ALT, SurfaceAction, UNDO};
pub use toolbar::{ButtonState, TOOLBAR, ToolbarAction, ToolbarButton};

use crossterm::event::KeyEvent;

use crate::document::{BlockType, Mark, Value};
use crate::hotkey::ModKey;

#[derive(Debug, Clone, Default)]
pub struct Editor {
    value: Value,
    keymap: Keymap,
}

impl Editor {
    pub const fn new(value: Value, mod_key: ModKey) -> Self {
        Self {
            value,
            keymap: Keymap::new(mod_key),
        }
    }

    pub const fn value(&self) -> &Value {
        &self.value
    }

    pub const fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub const fn mod_key(&self) -> ModKey {
        self.keymap.mod_key()
    }

    /// Replace the current value.
    pub fn on_change(&mut self, value: Value) {
        self.value = value;
    }

    /// Toggle a mark when `event` is one of the mark hotkeys.
    ///
    /// Returns `true` when the key was handled; the caller must then skip
    /// its default key handling.
    pub fn on_key_down(&mut self, event: &KeyEvent) -> bool {
        let Some(mark) = self.keymap.mark_for(event) else {
            return false;
        };
        tracing::debug!(%mark, "mark hotkey");
        self.on_click_mark(mark);
        true
    }

    pub fn on_click_mark(&mut self, mark: Mark) {
        let next = self.value.change().toggle_mark(mark).commit();
        self.on_change(next);
    }

    pub fn on_click_block(&mut self, kind: BlockType) {
        let state = ListState::classify(&self.value, ListKind::from_block(kind));
        let plan = plan_block_toggle(kind, self.has_block(kind), state);
        tracing::debug!(%kind, ?state, ?plan, "block toggle");
        let next = plan.apply(self.value.change()).commit();
        self.on_change(next);
    }

    pub fn on_click_undo(&mut self) {
        let next = self.value.undo();
        self.on_change(next);
    }

    pub fn on_click_redo(&mut self) {
        let next = self.value.redo();
        self.on_change(next);
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        self.value.active_marks().contains(&mark)
    }

    /// Whether every selected block has type `kind`.
    pub fn has_block(&self, kind: BlockType) -> bool {
        let blocks = self.value.blocks();
        !blocks.is_empty() && blocks.iter().all(|block| block.kind == kind)
    }

    /// Whether any selected block is a list item.
    pub fn is_in_list(&self) -> bool {
        self.value
            .blocks()
            .iter()
            .any(|block| block.kind == BlockType::ListItem)
    }

    /// Active state of a block button.
    ///
    /// List buttons only look at the parent of the first selected block.
    pub fn is_block_button_active(&self, kind: BlockType) -> bool {
        if !kind.is_list() {
            return self.has_block(kind);
        }
        let first_parent = self
            .value
            .block_paths()
            .first()
            .and_then(|path| self.value.document().parent(path))
            .map(|parent| parent.kind);
        self.is_in_list() && first_parent == Some(kind)
    }

    /// Default editing for keys `on_key_down` did not take. Returns whether
    /// the key meant anything to the surface.
    pub fn handle_surface_key(&mut self, event: &KeyEvent) -> bool {
        let Some(action) = self.keymap.surface_action(event) else {
            return false;
        };
        let value = &self.value;
        let next = match action {
            SurfaceAction::Undo => value.undo(),
            SurfaceAction::Redo => value.redo(),
            SurfaceAction::Insert(c) => value.change().insert_text(&c.to_string()).commit(),
            SurfaceAction::SplitBlock => value.change().split_block().commit(),
            SurfaceAction::DeleteBackward => value.change().delete_backward().commit(),
            SurfaceAction::DeleteForward => value.change().delete_forward().commit(),
            SurfaceAction::Move { movement, extend } => {
                value.change().move_focus(movement, extend).commit()
            }
            SurfaceAction::SelectAll => value.change().select_all().commit(),
        };
        self.on_change(next);
        true
    }

    /// Full key handling: hotkeys first, then default surface behavior.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        self.on_key_down(event) || self.handle_surface_key(event)
    }

    /// Run a toolbar button's action.
    pub fn dispatch(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Undo => self.on_click_undo(),
            ToolbarAction::Redo => self.on_click_redo(),
            ToolbarAction::Mark(mark) => self.on_click_mark(mark),
            ToolbarAction::Block(kind) => self.on_click_block(kind),
        }
    }

    pub fn button_state(&self, button: &ToolbarButton) -> ButtonState {
        match button.action {
            ToolbarAction::Undo => ButtonState {
                active: false,
                enabled: self.value.undo_len() > 0,
            },
            ToolbarAction::Redo => ButtonState {
                active: false,
                enabled: self.value.redo_len() > 0,
            },
            ToolbarAction::Mark(mark) => ButtonState {
                active: self.has_mark(mark),
                enabled: true,
            },
            ToolbarAction::Block(kind) => ButtonState {
                active: self.is_block_button_active(kind),
                enabled: true,
            },
        }
    }
}
