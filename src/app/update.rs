use crossterm::event::KeyEvent;

use crate::app::{Model, ToastLevel};
use crate::document::Selection;
use crate::editor::ToolbarAction;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Key press for the editor surface (hotkeys first, then default editing)
    EditorKey(KeyEvent),
    /// Toolbar button pressed
    Toolbar(ToolbarAction),
    /// Mouse press or drag in the page; `extend` keeps the selection anchor
    PlaceCursor { column: u16, row: u16, extend: bool },

    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),

    // Help
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Scroll help overlay up one line
    HelpScrollUp,
    /// Scroll help overlay down one line
    HelpScrollDown,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::EditorKey(key) => {
            if model.editor.handle_key(&key) {
                model.ensure_cursor_visible();
            }
        }
        Message::Toolbar(action) => {
            let undo_len = model.editor.value().undo_len();
            let redo_len = model.editor.value().redo_len();
            match action {
                ToolbarAction::Undo if undo_len == 0 => {
                    model.show_toast(ToastLevel::Info, "Nothing to undo");
                }
                ToolbarAction::Redo if redo_len == 0 => {
                    model.show_toast(ToastLevel::Info, "Nothing to redo");
                }
                _ => {
                    model.editor.dispatch(action);
                    model.ensure_cursor_visible();
                }
            }
        }
        Message::PlaceCursor {
            column,
            row,
            extend,
        } => place_cursor(&mut model, column, row, extend),

        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            model.scroll_offset = (model.scroll_offset + n).min(model.max_scroll());
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll_offset = 0;
        }
        Message::HideHelp => {
            model.help_visible = false;
            model.help_scroll_offset = 0;
        }
        Message::HelpScrollUp => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(1);
        }
        Message::HelpScrollDown => {
            model.help_scroll_offset += 1;
        }

        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.ensure_cursor_visible();
        }

        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}

fn place_cursor(model: &mut Model, column: u16, row: u16, extend: bool) {
    let text = model.text_area();
    if text.width == 0 || text.height == 0 {
        return;
    }
    let row = row.clamp(text.y, text.y + text.height - 1);
    let line = model.scroll_offset + usize::from(row - text.y);
    let col = column.saturating_sub(text.x);
    let lines = model.visual_lines();
    let value = model.editor.value();
    let Some(point) = crate::ui::point_at(&lines, value.document(), line, col) else {
        return;
    };
    let selection = if extend {
        Selection::new(value.selection().anchor(), point)
    } else {
        Selection::collapsed(point)
    };
    let next = value.change().select(selection).commit();
    model.editor.on_change(next);
    model.ensure_cursor_visible();
}
