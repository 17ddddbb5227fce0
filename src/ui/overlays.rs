use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::editor::{MARK_HOTKEYS, REDO, REDO_ALT, UNDO};

/// Build the help text. Hotkey labels follow the configured "mod" key.
pub fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let mod_key = model.editor.mod_key();
    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let entry = |keys: String, action: &str| Line::raw(format!("  {keys:<20}{action}"));

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
    let document = model
        .document_path
        .as_ref()
        .map_or_else(|| "<built-in>".to_string(), |p| p.display().to_string());

    let mut lines = vec![Line::styled("Formatting", section_style)];
    for (hotkey, mark) in MARK_HOTKEYS {
        lines.push(entry(hotkey.label(mod_key), &format!("Toggle {mark}")));
    }
    lines.push(entry("Toolbar click".to_string(), "Toggle mark or block type"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Editing", section_style));
    lines.push(entry("Enter".to_string(), "Split block"));
    lines.push(entry("Backspace / Delete".to_string(), "Delete or join blocks"));
    lines.push(entry("Arrows, Home/End".to_string(), "Move cursor"));
    lines.push(entry("Shift + movement".to_string(), "Extend selection"));
    lines.push(entry("Ctrl+A".to_string(), "Select all"));
    lines.push(entry("Click / drag".to_string(), "Place cursor / select"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("History", section_style));
    lines.push(entry(UNDO.label(mod_key), "Undo"));
    lines.push(entry(
        format!("{} / {}", REDO.label(mod_key), REDO_ALT.label(mod_key)),
        "Redo",
    ));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(entry("PageUp / PageDown".to_string(), "Scroll page"));
    lines.push(entry("F1".to_string(), "Toggle help"));
    lines.push(entry("Ctrl+Q / Ctrl+C".to_string(), "Quit"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Page", section_style));
    lines.push(Line::raw(format!("  Title: {}", model.meta.title)));
    lines.push(Line::raw(format!("  Description: {}", model.meta.description)));
    lines.push(Line::raw(format!("  Keywords: {}", model.meta.keywords)));
    lines.push(Line::raw(format!("  Canonical: {}", model.meta.canonical)));
    lines.push(Line::raw(format!("  Document: {document}")));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let all_lines = help_lines(model);

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = usize::from(content_height_u16);
    let max_scroll = all_lines.len().saturating_sub(content_height);
    let scroll = model.help_scroll_offset.min(max_scroll);

    let end = (scroll + content_height).min(all_lines.len());
    let visible: Vec<Line> = all_lines[scroll..end].to_vec();

    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height_u16);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1);
    let footer = Line::styled("Up/Down scroll \u{2502} any other key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
