//! Selection points and ranges.

use std::collections::BTreeSet;

use super::tree::Document;
use super::types::Mark;

/// A position in the document: a leaf block (document order) and a char
/// offset inside its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub block: usize,
    pub offset: usize,
}

impl Point {
    pub const fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }

    /// Clamp to an existing leaf and a valid offset within it.
    #[must_use]
    pub fn clamp(self, doc: &Document) -> Self {
        let last = doc.leaf_count().saturating_sub(1);
        let block = self.block.min(last);
        Self {
            block,
            offset: self.offset.min(doc.leaf_len(block)),
        }
    }
}

/// Cursor movements understood by [`Change::move_focus`].
///
/// [`Change::move_focus`]: super::Change::move_focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// Anchor/focus range plus the marks pending for the next insertion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    anchor: Point,
    focus: Point,
    marks: Option<BTreeSet<Mark>>,
}

impl Selection {
    pub const fn new(anchor: Point, focus: Point) -> Self {
        Self {
            anchor,
            focus,
            marks: None,
        }
    }

    pub const fn collapsed(point: Point) -> Self {
        Self::new(point, point)
    }

    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    pub const fn focus(&self) -> Point {
        self.focus
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_expanded(&self) -> bool {
        !self.is_collapsed()
    }

    /// The earlier of anchor and focus.
    pub fn start(&self) -> Point {
        self.anchor.min(self.focus)
    }

    /// The later of anchor and focus.
    pub fn end(&self) -> Point {
        self.anchor.max(self.focus)
    }

    /// Marks set while collapsed, applied to the next inserted text.
    pub const fn marks(&self) -> Option<&BTreeSet<Mark>> {
        self.marks.as_ref()
    }

    #[must_use]
    pub fn with_marks(mut self, marks: Option<BTreeSet<Mark>>) -> Self {
        self.marks = marks;
        self
    }

    /// Clamp both points to the document.
    #[must_use]
    pub fn clamp(self, doc: &Document) -> Self {
        Self {
            anchor: self.anchor.clamp(doc),
            focus: self.focus.clamp(doc),
            marks: self.marks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, BlockType, Text};

    #[test]
    fn test_start_and_end_order_backward_selection() {
        let sel = Selection::new(Point::new(2, 1), Point::new(0, 4));
        assert_eq!(sel.start(), Point::new(0, 4));
        assert_eq!(sel.end(), Point::new(2, 1));
        assert!(sel.is_expanded());
    }

    #[test]
    fn test_clamp_limits_block_and_offset() {
        let doc = Document::new(vec![
            Block::leaf(BlockType::Paragraph, Text::plain("abc")),
            Block::leaf(BlockType::Paragraph, Text::plain("de")),
        ]);
        assert_eq!(Point::new(9, 9).clamp(&doc), Point::new(1, 2));
        assert_eq!(Point::new(0, 9).clamp(&doc), Point::new(0, 3));
    }

    #[test]
    fn test_with_marks_survives_clamp() {
        let doc = Document::default();
        let sel = Selection::collapsed(Point::new(0, 5))
            .with_marks(Some(BTreeSet::from([Mark::Bold])))
            .clamp(&doc);
        assert_eq!(sel.focus(), Point::new(0, 0));
        assert!(sel.marks().is_some_and(|marks| marks.contains(&Mark::Bold)));
    }
}
