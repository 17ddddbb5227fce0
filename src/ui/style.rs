//! Theming and color definitions.
//!
//! Block and mark presentation are fixed lookup tables over every block type
//! and mark. Uses ANSI colors that adapt to the terminal's palette.

use std::collections::BTreeSet;

use ratatui::style::{Color, Modifier, Style};

use crate::document::{BlockType, Mark};
use crate::editor::ButtonState;

/// Base style of a block's text.
pub fn style_for_block(kind: BlockType) -> Style {
    match kind {
        BlockType::HeadingOne => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        BlockType::HeadingTwo => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        BlockType::BlockQuote => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::ITALIC),
        BlockType::Paragraph
        | BlockType::ListItem
        | BlockType::BulletedList
        | BlockType::NumberedList => Style::default(),
    }
}

/// Style of list markers and quote bars.
pub fn style_for_prefix(kind: BlockType) -> Style {
    match kind {
        BlockType::BlockQuote => Style::default().fg(Color::Indexed(245)),
        _ => Style::default().fg(Color::Yellow),
    }
}

pub fn style_for_mark(mark: Mark) -> Style {
    match mark {
        Mark::Bold => Style::default().add_modifier(Modifier::BOLD),
        Mark::Italic => Style::default().add_modifier(Modifier::ITALIC),
        Mark::Underlined => Style::default().add_modifier(Modifier::UNDERLINED),
        Mark::Code => Style::default().fg(Color::Yellow).bg(Color::Indexed(236)),
    }
}

/// Patch every mark's style over `base`.
pub fn style_for_marks(base: Style, marks: &BTreeSet<Mark>) -> Style {
    marks
        .iter()
        .fold(base, |style, &mark| style.patch(style_for_mark(mark)))
}

pub fn selection_style(base: Style) -> Style {
    base.add_modifier(Modifier::REVERSED)
}

pub fn button_style(state: ButtonState) -> Style {
    if !state.enabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else if state.active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).bg(Color::Indexed(238))
    }
}

pub fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_are_bold() {
        assert!(
            style_for_block(BlockType::HeadingOne)
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert!(
            style_for_block(BlockType::HeadingTwo)
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert_eq!(style_for_block(BlockType::Paragraph), Style::default());
    }

    #[test]
    fn test_marks_combine() {
        let marks = BTreeSet::from([Mark::Bold, Mark::Italic]);
        let style = style_for_marks(Style::default(), &marks);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::ITALIC));
        assert!(!style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_code_mark_keeps_heading_weight() {
        let base = style_for_block(BlockType::HeadingTwo);
        let style = style_for_marks(base, &BTreeSet::from([Mark::Code]));
        assert_eq!(style.fg, Some(Color::Yellow));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_button_styles_differ_by_state() {
        let active = button_style(ButtonState {
            active: true,
            enabled: true,
        });
        let idle = button_style(ButtonState {
            active: false,
            enabled: true,
        });
        let disabled = button_style(ButtonState {
            active: false,
            enabled: false,
        });
        assert_ne!(active, idle);
        assert_ne!(idle, disabled);
    }
}
