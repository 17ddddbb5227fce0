//! Immutable document values and their undo/redo history.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::change::Change;
use super::selection::{Point, Selection};
use super::tree::{Document, Path};
use super::types::{Block, Mark};

/// Default cap on the number of undo entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// A document and selection at one point in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) document: Arc<Document>,
    pub(crate) selection: Selection,
}

/// Undo and redo stacks, most recent last.
#[derive(Debug, Clone)]
pub(crate) struct History {
    pub(crate) undos: Vec<Snapshot>,
    pub(crate) redos: Vec<Snapshot>,
    pub(crate) limit: usize,
    /// Cursor position after the last typed character, for merging typing
    /// into a single undo entry.
    pub(crate) typing_at: Option<Point>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            undos: Vec::new(),
            redos: Vec::new(),
            limit: DEFAULT_HISTORY_LIMIT,
            typing_at: None,
        }
    }
}

impl History {
    pub(crate) fn push_undo(&mut self, snapshot: Snapshot) {
        self.undos.push(snapshot);
        if self.undos.len() > self.limit {
            let excess = self.undos.len() - self.limit;
            self.undos.drain(..excess);
        }
    }
}

/// An immutable snapshot of the editable document.
///
/// Every edit produces a new `Value` through [`Value::change`]; the old one
/// is left untouched. The tree is shared behind an [`Arc`], so cloning a
/// value is cheap.
///
/// Two values are equal when their documents and selections are equal;
/// history is not compared.
#[derive(Debug, Clone, Default)]
pub struct Value {
    document: Arc<Document>,
    selection: Selection,
    history: History,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document && self.selection == other.selection
    }
}

impl Eq for Value {}

impl Value {
    /// Create a value with the cursor at the start of the document.
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(document),
            selection: Selection::default(),
            history: History::default(),
        }
    }

    pub(crate) const fn from_parts(
        document: Arc<Document>,
        selection: Selection,
        history: History,
    ) -> Self {
        Self {
            document,
            selection,
            history,
        }
    }

    /// Cap the undo stack at `limit` entries (at least one).
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history.limit = limit.max(1);
        let keep = self.history.limit;
        if self.history.undos.len() > keep {
            let excess = self.history.undos.len() - keep;
            self.history.undos.drain(..excess);
        }
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) const fn document_arc(&self) -> &Arc<Document> {
        &self.document
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub(crate) const fn history(&self) -> &History {
        &self.history
    }

    pub fn undo_len(&self) -> usize {
        self.history.undos.len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redos.len()
    }

    pub const fn history_limit(&self) -> usize {
        self.history.limit
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: Arc::clone(&self.document),
            selection: self.selection.clone(),
        }
    }

    /// Start a change against this value.
    pub fn change(&self) -> Change<'_> {
        Change::new(self)
    }

    /// The value before the most recent edit, or an identical value when
    /// there is nothing to undo.
    #[must_use]
    pub fn undo(&self) -> Self {
        let mut history = self.history.clone();
        let Some(previous) = history.undos.pop() else {
            return self.clone();
        };
        history.redos.push(self.snapshot());
        history.typing_at = None;
        tracing::debug!(
            undos = history.undos.len(),
            redos = history.redos.len(),
            "undo"
        );
        Self::from_parts(previous.document, previous.selection, history)
    }

    /// Re-apply the most recently undone edit, or an identical value when
    /// there is nothing to redo.
    #[must_use]
    pub fn redo(&self) -> Self {
        let mut history = self.history.clone();
        let Some(next) = history.redos.pop() else {
            return self.clone();
        };
        history.push_undo(self.snapshot());
        history.typing_at = None;
        tracing::debug!(
            undos = history.undos.len(),
            redos = history.redos.len(),
            "redo"
        );
        Self::from_parts(next.document, next.selection, history)
    }

    /// Paths of the leaf blocks touched by the selection.
    pub fn block_paths(&self) -> Vec<Path> {
        selected_paths(&self.document, &self.selection)
    }

    /// Leaf blocks touched by the selection.
    pub fn blocks(&self) -> Vec<&Block> {
        self.block_paths()
            .iter()
            .filter_map(|path| self.document.block(path))
            .collect()
    }

    /// Marks in effect at the selection.
    ///
    /// Collapsed: the pending marks, or the marks at the cursor. Expanded:
    /// the marks carried by every selected character.
    pub fn active_marks(&self) -> BTreeSet<Mark> {
        active_marks(&self.document, &self.selection)
    }
}

pub(crate) fn selected_paths(doc: &Document, selection: &Selection) -> Vec<Path> {
    let paths = doc.leaf_paths();
    let start = selection.start().block;
    let end = selection.end().block.min(paths.len().saturating_sub(1));
    paths.get(start..=end).map(<[Path]>::to_vec).unwrap_or_default()
}

pub(crate) fn active_marks(doc: &Document, selection: &Selection) -> BTreeSet<Mark> {
    if selection.is_collapsed() {
        if let Some(marks) = selection.marks() {
            return marks.clone();
        }
        let focus = selection.focus();
        return doc
            .leaf_text(focus.block)
            .map(|text| text.marks_at(focus.offset))
            .unwrap_or_default();
    }

    let (start, end) = (selection.start(), selection.end());
    let mut shared: Option<BTreeSet<Mark>> = None;
    for index in start.block..=end.block {
        let Some(text) = doc.leaf_text(index) else {
            continue;
        };
        let from = if index == start.block { start.offset } else { 0 };
        let to = if index == end.block { end.offset } else { text.len() };
        if let Some(marks) = text.marks_in(from, to) {
            shared = Some(match shared {
                None => marks,
                Some(acc) => acc.intersection(&marks).copied().collect(),
            });
        }
    }
    shared.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockType, Leaf, Text};

    fn two_paragraphs() -> Value {
        Value::new(Document::new(vec![
            Block::leaf(
                BlockType::Paragraph,
                Text::new(vec![Leaf::marked("bold", [Mark::Bold]), Leaf::plain(" plain")]),
            ),
            Block::leaf(BlockType::Paragraph, Text::plain("second")),
        ]))
    }

    #[test]
    fn test_new_value_has_empty_history() {
        let value = two_paragraphs();
        assert_eq!(value.undo_len(), 0);
        assert_eq!(value.redo_len(), 0);
        assert_eq!(value.history_limit(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(value.selection().focus(), Point::new(0, 0));
    }

    #[test]
    fn test_active_marks_collapsed_reads_cursor() {
        let value = two_paragraphs();
        let at_bold = value
            .change()
            .select(Selection::collapsed(Point::new(0, 2)))
            .commit();
        assert!(at_bold.active_marks().contains(&Mark::Bold));

        let at_plain = value
            .change()
            .select(Selection::collapsed(Point::new(0, 7)))
            .commit();
        assert!(at_plain.active_marks().is_empty());
    }

    #[test]
    fn test_active_marks_expanded_requires_every_char() {
        let value = two_paragraphs();
        let partial = value
            .change()
            .select(Selection::new(Point::new(0, 0), Point::new(0, 6)))
            .commit();
        assert!(partial.active_marks().is_empty());

        let covered = value
            .change()
            .select(Selection::new(Point::new(0, 0), Point::new(0, 4)))
            .commit();
        assert_eq!(covered.active_marks(), BTreeSet::from([Mark::Bold]));
    }

    #[test]
    fn test_blocks_span_selection() {
        let value = two_paragraphs()
            .change()
            .select(Selection::new(Point::new(1, 2), Point::new(0, 1)))
            .commit();
        assert_eq!(value.blocks().len(), 2);
    }

    #[test]
    fn test_undo_and_redo_on_empty_stacks_are_noops() {
        let value = two_paragraphs();
        assert_eq!(value.undo(), value);
        assert_eq!(value.redo(), value);
        assert_eq!(value.undo().redo_len(), 0);
    }

    #[test]
    fn test_history_limit_drops_oldest_entries() {
        let mut value = two_paragraphs().with_history_limit(3);
        for _ in 0..5 {
            value = value.change().set_blocks(BlockType::HeadingOne).commit();
            value = value.change().set_blocks(BlockType::Paragraph).commit();
        }
        assert_eq!(value.undo_len(), 3);
    }

    #[test]
    fn test_undo_moves_snapshot_to_redo() {
        let value = two_paragraphs();
        let edited = value.change().set_blocks(BlockType::HeadingTwo).commit();
        let undone = edited.undo();
        assert_eq!(undone, value);
        assert_eq!(undone.undo_len(), 0);
        assert_eq!(undone.redo_len(), 1);
        assert_eq!(undone.redo(), edited);
    }
}
