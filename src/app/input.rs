use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: &KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if model.help_visible {
            return match key.code {
                KeyCode::Up => Some(Message::HelpScrollUp),
                KeyCode::Down => Some(Message::HelpScrollDown),
                _ => Some(Message::HideHelp),
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q' | 'c') if ctrl => Some(Message::Quit),
            KeyCode::PageUp => Some(Message::ScrollUp(page_step(model))),
            KeyCode::PageDown => Some(Message::ScrollDown(page_step(model))),
            _ => Some(Message::EditorKey(*key)),
        }
    }

    pub(super) fn handle_mouse(mouse: &MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }

        let (width, height) = model.terminal_size;
        let screen = crate::ui::areas(Rect::new(0, 0, width, height));
        let text = screen.text;
        let extend = mouse.modifiers.contains(KeyModifiers::SHIFT);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if point_in_rect(mouse.column, mouse.row, screen.header) {
                    return crate::ui::button_at(screen.header, mouse.column, mouse.row)
                        .map(|button| Message::Toolbar(button.action));
                }
                if point_in_rect(mouse.column, mouse.row, text) {
                    return Some(Message::PlaceCursor {
                        column: mouse.column,
                        row: mouse.row,
                        extend,
                    });
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left)
                if point_in_rect(mouse.column, mouse.row, screen.page) =>
            {
                Some(Message::PlaceCursor {
                    column: mouse.column,
                    row: mouse.row,
                    extend: true,
                })
            }
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

fn page_step(model: &Model) -> usize {
    usize::from(model.text_area().height.saturating_sub(1)).max(1)
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
