//! Toolbar buttons and their derived state.

use crate::document::{BlockType, Mark};

/// What a toolbar button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Undo,
    Redo,
    Mark(Mark),
    Block(BlockType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    pub action: ToolbarAction,
    pub label: &'static str,
}

impl ToolbarButton {
    const fn new(action: ToolbarAction, label: &'static str) -> Self {
        Self { action, label }
    }
}

/// Toolbar buttons, left to right.
pub const TOOLBAR: [ToolbarButton; 11] = [
    ToolbarButton::new(ToolbarAction::Undo, "←"),
    ToolbarButton::new(ToolbarAction::Redo, "→"),
    ToolbarButton::new(ToolbarAction::Mark(Mark::Bold), "B"),
    ToolbarButton::new(ToolbarAction::Mark(Mark::Italic), "I"),
    ToolbarButton::new(ToolbarAction::Mark(Mark::Underlined), "U"),
    ToolbarButton::new(ToolbarAction::Mark(Mark::Code), "code"),
    ToolbarButton::new(ToolbarAction::Block(BlockType::HeadingOne), "H1"),
    ToolbarButton::new(ToolbarAction::Block(BlockType::HeadingTwo), "H2"),
    ToolbarButton::new(ToolbarAction::Block(BlockType::BlockQuote), "quote"),
    ToolbarButton::new(ToolbarAction::Block(BlockType::NumberedList), "1. list"),
    ToolbarButton::new(ToolbarAction::Block(BlockType::BulletedList), "• list"),
];

/// Derived display state of a button. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub active: bool,
    pub enabled: bool,
}
