//! Toolbar layout, shared by rendering and mouse hit-testing.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::Model;
use crate::editor::{TOOLBAR, ToolbarAction, ToolbarButton};

use super::style;

/// Columns between button groups.
const GROUP_GAP: u16 = 3;

/// A toolbar button and where it sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarItem {
    pub button: ToolbarButton,
    pub rect: Rect,
}

const fn group(action: ToolbarAction) -> u8 {
    match action {
        ToolbarAction::Undo | ToolbarAction::Redo => 0,
        ToolbarAction::Mark(_) => 1,
        ToolbarAction::Block(_) => 2,
    }
}

/// Lay the buttons out left to right on the first row of `area`. Buttons
/// that do not fit are dropped.
pub fn toolbar_items(area: Rect) -> Vec<ToolbarItem> {
    let mut items = Vec::with_capacity(TOOLBAR.len());
    if area.height == 0 {
        return items;
    }
    let right = area.x.saturating_add(area.width);
    let mut x = area.x.saturating_add(1);
    let mut previous_group = None;
    for button in TOOLBAR {
        let current = group(button.action);
        if previous_group.is_some_and(|g| g != current) {
            x = x.saturating_add(GROUP_GAP);
        } else if previous_group.is_some() {
            x = x.saturating_add(1);
        }
        previous_group = Some(current);
        let width = u16::try_from(button.label.width() + 2).unwrap_or(u16::MAX);
        if x.saturating_add(width) > right {
            break;
        }
        items.push(ToolbarItem {
            button,
            rect: Rect::new(x, area.y, width, 1),
        });
        x += width;
    }
    items
}

/// The button under (`column`, `row`), if any.
pub fn button_at(area: Rect, column: u16, row: u16) -> Option<ToolbarButton> {
    toolbar_items(area)
        .into_iter()
        .find(|item| item.rect.contains(Position::new(column, row)))
        .map(|item| item.button)
}

pub fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
        area,
    );
    let items = toolbar_items(area);
    for item in &items {
        let state = model.editor.button_state(&item.button);
        frame.render_widget(
            Paragraph::new(format!(" {} ", item.button.label)).style(style::button_style(state)),
            item.rect,
        );
    }

    let value = model.editor.value();
    let counts = format!(" Undo: {}  Redo: {} ", value.undo_len(), value.redo_len());
    let counts_width = u16::try_from(counts.width()).unwrap_or(u16::MAX);
    let used = items
        .last()
        .map_or(area.x, |item| item.rect.x + item.rect.width);
    let right = area.x.saturating_add(area.width);
    if area.height > 0 && used.saturating_add(counts_width + 1) <= right {
        let rect = Rect::new(right - counts_width, area.y, counts_width, 1);
        frame.render_widget(
            Paragraph::new(counts).style(Style::default().fg(Color::Indexed(245))),
            rect,
        );
    }
}
