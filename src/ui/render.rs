use std::collections::BTreeSet;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::Model;
use crate::document::{Mark, Point, Selection, Text};

use super::layout::{self, Areas, VisualLine};
use super::{overlays, status, style, toolbar};

pub const PLACEHOLDER: &str = "Enter some rich text...";

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let areas = layout::areas(area);

    toolbar::render_toolbar(model, frame, areas.header);
    render_page(model, frame, &areas);
    status::render_status_bar(model, frame, areas.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_page(model: &Model, frame: &mut Frame, areas: &Areas) {
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
        areas.page,
    );
    let text_area = areas.text;
    if text_area.width == 0 || text_area.height == 0 {
        return;
    }

    let value = model.editor.value();
    let doc = value.document();
    if doc.leaf_count() == 1 && doc.leaf_len(0) == 0 {
        frame.render_widget(
            Paragraph::new(PLACEHOLDER).style(style::placeholder_style()),
            text_area,
        );
        if !model.help_visible {
            frame.set_cursor_position(Position::new(text_area.x, text_area.y));
        }
        return;
    }

    let lines = layout::layout_document(doc, text_area.width);
    let visible: Vec<Line> = lines
        .iter()
        .skip(model.scroll_offset)
        .take(usize::from(text_area.height))
        .map(|line| {
            let text = doc.leaf_text(line.block).cloned().unwrap_or_default();
            render_line(line, &text, value.selection())
        })
        .collect();
    frame.render_widget(Paragraph::new(visible), text_area);

    if model.help_visible {
        return;
    }
    if let Some((row, col)) = layout::cursor_position(&lines, doc, value.selection().focus())
        && row >= model.scroll_offset
        && row < model.scroll_offset + usize::from(text_area.height)
    {
        let y = text_area.y + u16::try_from(row - model.scroll_offset).unwrap_or(0);
        let x = text_area.x + col.min(text_area.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// Build the styled spans for one visual line.
fn render_line(line: &VisualLine, text: &Text, selection: &Selection) -> Line<'static> {
    let base = style::style_for_block(line.kind);
    let mut spans = Vec::new();
    if !line.prefix.is_empty() {
        spans.push(Span::styled(
            line.prefix.clone(),
            style::style_for_prefix(line.kind),
        ));
    }

    let (start, end) = (selection.start(), selection.end());
    let mut run = String::new();
    let mut run_style = base;
    for (offset, (c, marks)) in chars_with_marks(text)
        .into_iter()
        .enumerate()
        .skip(line.start)
        .take(line.end - line.start)
    {
        let point = Point::new(line.block, offset);
        let mut char_style = style::style_for_marks(base, marks);
        if point >= start && point < end {
            char_style = style::selection_style(char_style);
        }
        if char_style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = char_style;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

fn chars_with_marks(text: &Text) -> Vec<(char, &BTreeSet<Mark>)> {
    text.leaves()
        .iter()
        .flat_map(|leaf| leaf.text.chars().map(move |c| (c, &leaf.marks)))
        .collect()
}
