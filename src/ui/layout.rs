//! Screen regions and word-wrapped document lines.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::document::{BlockType, Document, Point};

pub const HEADER_HEIGHT: u16 = 2;
pub const STATUS_HEIGHT: u16 = 1;
/// Widest the page gets, borders included.
pub const PAGE_MAX_WIDTH: u16 = 84;

/// The regions of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub page: Rect,
    /// Inside the page border and padding.
    pub text: Rect,
    pub status: Rect,
}

pub fn areas(area: Rect) -> Areas {
    let header_height = HEADER_HEIGHT.min(area.height);
    let status_height = STATUS_HEIGHT.min(area.height.saturating_sub(header_height));
    let header = Rect::new(area.x, area.y, area.width, header_height);
    let status = Rect::new(
        area.x,
        area.y + area.height - status_height,
        area.width,
        status_height,
    );
    let body_height = area.height - header_height - status_height;
    let page_width = area.width.min(PAGE_MAX_WIDTH);
    let page = Rect::new(
        area.x + (area.width - page_width) / 2,
        area.y + header_height,
        page_width,
        body_height,
    );
    let text = Rect::new(
        page.x + 2,
        page.y + 1,
        page.width.saturating_sub(4),
        page.height.saturating_sub(2),
    );
    Areas {
        header,
        page,
        text,
        status,
    }
}

/// One screen row of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    /// Leaf block index in document order.
    pub block: usize,
    pub kind: BlockType,
    /// Char range of the block's text shown on this row.
    pub start: usize,
    pub end: usize,
    /// List marker or quote bar; blank on continuation rows.
    pub prefix: String,
    /// Whether this is the block's last row.
    pub last: bool,
}

/// Word-wrap every leaf block of `doc` to `width` columns.
pub fn layout_document(doc: &Document, width: u16) -> Vec<VisualLine> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    for (index, path) in doc.leaf_paths().iter().enumerate() {
        let Some(block) = doc.block(path) else {
            continue;
        };
        let Some(text) = block.text() else {
            continue;
        };
        let prefix = block_prefix(doc, path);
        let continuation = " ".repeat(prefix.width());
        let available = width.saturating_sub(prefix.width()).max(1);
        let chars: Vec<char> = text.as_string().chars().collect();
        let ranges = wrap_ranges(&chars, available);
        let count = ranges.len();
        for (row, (start, end)) in ranges.into_iter().enumerate() {
            lines.push(VisualLine {
                block: index,
                kind: block.kind,
                start,
                end,
                prefix: if row == 0 {
                    prefix.clone()
                } else {
                    continuation.clone()
                },
                last: row + 1 == count,
            });
        }
    }
    lines
}

fn block_prefix(doc: &Document, path: &[usize]) -> String {
    let mut prefix = String::new();
    for depth in 1..path.len() {
        match doc.block(&path[..depth]).map(|block| block.kind) {
            Some(BlockType::BlockQuote) => prefix.push_str("│ "),
            Some(kind) if kind.is_list() && depth + 1 < path.len() => prefix.push_str("  "),
            _ => {}
        }
    }
    match doc.block(path).map(|block| block.kind) {
        Some(BlockType::BlockQuote) => prefix.push_str("│ "),
        Some(BlockType::ListItem) => match doc.parent(path).map(|parent| parent.kind) {
            Some(BlockType::NumberedList) => {
                let number = path.last().map_or(1, |idx| idx + 1);
                prefix.push_str(&format!("{number}. "));
            }
            _ => prefix.push_str("• "),
        },
        _ => {}
    }
    prefix
}

/// Greedy wrap, breaking after the last space that fits. Words longer than
/// the width are split.
fn wrap_ranges(chars: &[char], width: usize) -> Vec<(usize, usize)> {
    if chars.is_empty() {
        return vec![(0, 0)];
    }
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut col = 0;
        let mut end = start;
        let mut last_space = None;
        while end < chars.len() {
            let w = chars[end].width().unwrap_or(0);
            if col + w > width && end > start {
                break;
            }
            col += w;
            if chars[end] == ' ' {
                last_space = Some(end);
            }
            end += 1;
        }
        if end < chars.len()
            && let Some(space) = last_space
        {
            end = space + 1;
        }
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Row (into `lines`) and column of `point`.
pub fn cursor_position(lines: &[VisualLine], doc: &Document, point: Point) -> Option<(usize, u16)> {
    let row = lines.iter().position(|line| {
        line.block == point.block
            && line.start <= point.offset
            && (point.offset < line.end || line.last)
    })?;
    let line = &lines[row];
    let text = doc.leaf_text(line.block)?.as_string();
    let before: usize = text
        .chars()
        .skip(line.start)
        .take(point.offset.saturating_sub(line.start))
        .map(|c| c.width().unwrap_or(0))
        .sum();
    let col = u16::try_from(line.prefix.width() + before).unwrap_or(u16::MAX);
    Some((row, col))
}

/// The document point shown at `row`, `col` (relative to the text area).
pub fn point_at(lines: &[VisualLine], doc: &Document, row: usize, col: u16) -> Option<Point> {
    let line = lines.get(row).or_else(|| lines.last())?;
    let text = doc.leaf_text(line.block)?.as_string();
    let target = usize::from(col).saturating_sub(line.prefix.width());
    let max = if line.last {
        line.end
    } else {
        line.end.saturating_sub(1).max(line.start)
    };
    let mut offset = line.start;
    let mut width = 0;
    for c in text.chars().skip(line.start).take(max - line.start) {
        let w = c.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        width += w;
        offset += 1;
    }
    Some(Point::new(line.block, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, Text};

    fn para(text: &str) -> Block {
        Block::leaf(BlockType::Paragraph, Text::plain(text))
    }

    #[test]
    fn test_areas_center_page() {
        let a = areas(Rect::new(0, 0, 120, 30));
        assert_eq!(a.header, Rect::new(0, 0, 120, 2));
        assert_eq!(a.status, Rect::new(0, 29, 120, 1));
        assert_eq!(a.page.width, PAGE_MAX_WIDTH);
        assert_eq!(a.page.x, 18);
        assert_eq!(a.text, Rect::new(20, 3, 80, 25));
    }

    #[test]
    fn test_areas_tiny_terminal_does_not_underflow() {
        let a = areas(Rect::new(0, 0, 3, 2));
        assert_eq!(a.text.width, 0);
        assert_eq!(a.status.height, 0);
    }

    #[test]
    fn test_wrap_breaks_at_spaces() {
        let chars: Vec<char> = "hello big world".chars().collect();
        assert_eq!(wrap_ranges(&chars, 10), vec![(0, 10), (10, 15)]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let chars: Vec<char> = "abcdefgh".chars().collect();
        assert_eq!(wrap_ranges(&chars, 3), vec![(0, 3), (3, 6), (6, 8)]);
    }

    #[test]
    fn test_list_prefixes() {
        let doc = Document::new(vec![
            Block::container(
                BlockType::NumberedList,
                vec![
                    Block::leaf(BlockType::ListItem, Text::plain("one")),
                    Block::leaf(BlockType::ListItem, Text::plain("two")),
                ],
            ),
            Block::container(
                BlockType::BulletedList,
                vec![Block::leaf(BlockType::ListItem, Text::plain("dot"))],
            ),
            Block::leaf(BlockType::BlockQuote, Text::plain("quoted")),
        ]);
        let prefixes: Vec<_> = layout_document(&doc, 40)
            .into_iter()
            .map(|line| line.prefix)
            .collect();
        assert_eq!(prefixes, vec!["1. ", "2. ", "• ", "│ "]);
    }

    #[test]
    fn test_continuation_rows_are_indented() {
        let doc = Document::new(vec![Block::container(
            BlockType::BulletedList,
            vec![Block::leaf(BlockType::ListItem, Text::plain("aaaa bbbb"))],
        )]);
        let lines = layout_document(&doc, 7);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].prefix, "  ");
        assert!(lines[1].last);
        assert!(!lines[0].last);
    }

    #[test]
    fn test_cursor_position_and_point_at_agree() {
        let doc = Document::new(vec![para("hello world"), para("x")]);
        let lines = layout_document(&doc, 8);
        let (row, col) = cursor_position(&lines, &doc, Point::new(0, 8)).unwrap();
        assert_eq!((row, col), (1, 2));
        assert_eq!(point_at(&lines, &doc, row, col), Some(Point::new(0, 8)));
        let (row, col) = cursor_position(&lines, &doc, Point::new(1, 1)).unwrap();
        assert_eq!((row, col), (2, 1));
    }

    #[test]
    fn test_point_at_past_line_end_clamps() {
        let doc = Document::new(vec![para("abc")]);
        let lines = layout_document(&doc, 20);
        assert_eq!(point_at(&lines, &doc, 0, 50), Some(Point::new(0, 3)));
        assert_eq!(point_at(&lines, &doc, 9, 0), Some(Point::new(0, 0)));
    }
}
