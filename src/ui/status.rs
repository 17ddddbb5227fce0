use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    if let Some((message, level)) = model.active_toast() {
        render_toast(message, level, frame, area);
        return;
    }

    let value = model.editor.value();
    let focus = value.selection().focus();
    let kind = value
        .document()
        .leaf(focus.block)
        .map_or("paragraph", |block| block.kind.as_str());
    let selected = if value.selection().is_expanded() {
        " [selection]"
    } else {
        ""
    };
    // Position first so it survives truncation; history counts live in the toolbar.
    let status = format!(
        " Ln {}, Col {}  {}{}  {}  {}  F1:help",
        focus.block + 1,
        focus.offset + 1,
        kind,
        selected,
        model.route,
        model.meta.title,
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

fn render_toast(message: &str, level: ToastLevel, frame: &mut Frame, area: Rect) {
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!(" {prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
