//! Building new values from old ones.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::selection::{Movement, Point, Selection};
use super::tree::{Document, Path};
use super::types::{BlockType, Mark};
use super::value::{self, Value};

/// How an edit participates in undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    /// A single typed character inserted at `from`.
    Typing { from: Point },
    Other,
}

/// A pending set of operations against a [`Value`].
///
/// Operations consume and return the change so they can be chained;
/// [`Change::commit`] produces the new value. The base value is never
/// modified, and the tree is only copied once an operation edits it.
///
/// ```
/// use urupemba::document::{BlockType, Value};
///
/// let value = Value::default();
/// let next = value
///     .change()
///     .set_blocks(BlockType::ListItem)
///     .wrap_block(BlockType::BulletedList)
///     .commit();
/// assert_eq!(next.document().nodes()[0].kind, BlockType::BulletedList);
/// assert_eq!(value.document().nodes()[0].kind, BlockType::Paragraph);
/// ```
#[derive(Debug)]
pub struct Change<'a> {
    base: &'a Value,
    document: Cow<'a, Document>,
    selection: Selection,
    edit: Option<Edit>,
}

impl<'a> Change<'a> {
    pub(crate) fn new(base: &'a Value) -> Self {
        Self {
            base,
            document: Cow::Borrowed(base.document()),
            selection: base.selection().clone(),
            edit: None,
        }
    }

    /// The document as edited so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Marks in effect at the current selection.
    pub fn active_marks(&self) -> BTreeSet<Mark> {
        value::active_marks(&self.document, &self.selection)
    }

    fn selected_paths(&self) -> Vec<Path> {
        value::selected_paths(&self.document, &self.selection)
    }

    fn selected_leaves(&self) -> std::ops::RangeInclusive<usize> {
        self.selection.start().block..=self.selection.end().block
    }

    fn record(mut self, edit: Edit) -> Self {
        self.edit = Some(match self.edit {
            None => edit,
            Some(_) => Edit::Other,
        });
        self
    }

    /// Replace the selection. Selecting never creates history.
    #[must_use]
    pub fn select(mut self, selection: Selection) -> Self {
        self.selection = selection.clamp(&self.document);
        self
    }

    /// Collapse the selection at `point`.
    #[must_use]
    pub fn move_to(self, point: Point) -> Self {
        self.select(Selection::collapsed(point))
    }

    /// Select the whole document.
    #[must_use]
    pub fn select_all(self) -> Self {
        let last = self.document.leaf_count().saturating_sub(1);
        let end = Point::new(last, self.document.leaf_len(last));
        self.select(Selection::new(Point::default(), end))
    }

    /// Move the focus; with `extend` the anchor stays put.
    ///
    /// Moving left or right without extending collapses an expanded
    /// selection to its start or end.
    #[must_use]
    pub fn move_focus(self, movement: Movement, extend: bool) -> Self {
        if !extend && self.selection.is_expanded() {
            match movement {
                Movement::Left => {
                    let start = self.selection.start();
                    return self.move_to(start);
                }
                Movement::Right => {
                    let end = self.selection.end();
                    return self.move_to(end);
                }
                _ => {}
            }
        }
        let doc = &self.document;
        let focus = self.selection.focus();
        let last = doc.leaf_count().saturating_sub(1);
        let target = match movement {
            Movement::Left if focus.offset > 0 => Point::new(focus.block, focus.offset - 1),
            Movement::Left if focus.block > 0 => {
                Point::new(focus.block - 1, doc.leaf_len(focus.block - 1))
            }
            Movement::Right if focus.offset < doc.leaf_len(focus.block) => {
                Point::new(focus.block, focus.offset + 1)
            }
            Movement::Right if focus.block < last => Point::new(focus.block + 1, 0),
            Movement::Left | Movement::Right => focus,
            Movement::Up if focus.block > 0 => Point::new(focus.block - 1, focus.offset),
            Movement::Up => Point::new(0, 0),
            Movement::Down if focus.block < last => Point::new(focus.block + 1, focus.offset),
            Movement::Down => Point::new(last, doc.leaf_len(last)),
            Movement::LineStart => Point::new(focus.block, 0),
            Movement::LineEnd => Point::new(focus.block, doc.leaf_len(focus.block)),
            Movement::DocumentStart => Point::new(0, 0),
            Movement::DocumentEnd => Point::new(last, doc.leaf_len(last)),
        };
        let anchor = if extend {
            self.selection.anchor()
        } else {
            target
        };
        self.select(Selection::new(anchor, target))
    }

    /// Toggle `mark` at the selection.
    ///
    /// Collapsed: flips the mark in the pending marks used by the next
    /// insertion. Expanded: removes the mark if every selected character
    /// has it, otherwise adds it to the whole range.
    #[must_use]
    pub fn toggle_mark(mut self, mark: Mark) -> Self {
        let mut marks = self.active_marks();
        let present = marks.contains(&mark);
        if self.selection.is_collapsed() {
            if present {
                marks.remove(&mark);
            } else {
                marks.insert(mark);
            }
            self.selection = self.selection.with_marks(Some(marks));
        } else {
            let (start, end) = (self.selection.start(), self.selection.end());
            let doc = self.document.to_mut();
            for index in start.block..=end.block {
                let Some(text) = doc.leaf_text_mut(index) else {
                    continue;
                };
                let from = if index == start.block { start.offset } else { 0 };
                let to = if index == end.block { end.offset } else { text.len() };
                text.set_mark(from, to, mark, !present);
            }
        }
        self.record(Edit::Other)
    }

    /// Set the type of every selected leaf block.
    #[must_use]
    pub fn set_blocks(mut self, kind: BlockType) -> Self {
        let leaves = self.selected_leaves();
        self.document.to_mut().set_kind(leaves, kind);
        self.record(Edit::Other)
    }

    /// Wrap the selected blocks in a new `kind` block.
    #[must_use]
    pub fn wrap_block(mut self, kind: BlockType) -> Self {
        let leaves = self.selected_leaves();
        self.document.to_mut().wrap(leaves, kind);
        self.record(Edit::Other)
    }

    /// Lift the selected blocks out of their closest `kind` ancestors.
    #[must_use]
    pub fn unwrap_block(mut self, kind: BlockType) -> Self {
        if self
            .selected_paths()
            .iter()
            .all(|path| self.document.closest(path, |b| b.kind == kind).is_none())
        {
            return self;
        }
        let leaves = self.selected_leaves();
        self.document.to_mut().unwrap(leaves, kind);
        self.record(Edit::Other)
    }

    /// Insert text at the cursor, replacing an expanded selection. The
    /// inserted text carries the active marks.
    #[must_use]
    pub fn insert_text(self, text: &str) -> Self {
        if text.is_empty() {
            return self;
        }
        let mut change = if self.selection.is_expanded() {
            self.delete_selection()
        } else {
            self
        };
        let marks = change.active_marks();
        let from = change.selection.focus();
        if let Some(target) = change.document.to_mut().leaf_text_mut(from.block) {
            target.insert(from.offset, text, &marks);
        }
        let to = Point::new(from.block, from.offset + text.chars().count());
        change.selection = Selection::collapsed(to);
        let edit = if text.chars().count() == 1 {
            Edit::Typing { from }
        } else {
            Edit::Other
        };
        change.record(edit)
    }

    /// Delete the selected range, leaving a collapsed selection at its
    /// start. Blocks between the two ends are removed and the end block's
    /// remaining text joins the start block.
    #[must_use]
    pub fn delete_selection(mut self) -> Self {
        let (start, end) = (self.selection.start(), self.selection.end());
        if start == end {
            return self;
        }
        let doc = self.document.to_mut();
        if start.block == end.block {
            if let Some(text) = doc.leaf_text_mut(start.block) {
                text.remove(start.offset, end.offset);
            }
        } else {
            let tail = doc
                .leaf_text_mut(end.block)
                .map(|text| text.split_off(end.offset))
                .unwrap_or_default();
            if let Some(text) = doc.leaf_text_mut(start.block) {
                let _removed = text.split_off(start.offset);
                text.append(tail);
            }
            doc.remove_leaves(start.block + 1..=end.block);
        }
        self.selection = Selection::collapsed(start);
        self.record(Edit::Other)
    }

    /// Backspace: delete the selection, the previous character, or join the
    /// block with the previous one.
    #[must_use]
    pub fn delete_backward(mut self) -> Self {
        if self.selection.is_expanded() {
            return self.delete_selection();
        }
        let at = self.selection.focus();
        if at.offset > 0 {
            if let Some(text) = self.document.to_mut().leaf_text_mut(at.block) {
                text.remove(at.offset - 1, at.offset);
            }
            self.selection = Selection::collapsed(Point::new(at.block, at.offset - 1));
            return self.record(Edit::Other);
        }
        if at.block == 0 {
            return self;
        }
        match self.document.to_mut().join_with_previous(at.block) {
            Some(offset) => {
                self.selection = Selection::collapsed(Point::new(at.block - 1, offset));
                self.record(Edit::Other)
            }
            None => self,
        }
    }

    /// Delete: delete the selection, the next character, or join the next
    /// block onto this one.
    #[must_use]
    pub fn delete_forward(mut self) -> Self {
        if self.selection.is_expanded() {
            return self.delete_selection();
        }
        let at = self.selection.focus();
        if at.offset < self.document.leaf_len(at.block) {
            if let Some(text) = self.document.to_mut().leaf_text_mut(at.block) {
                text.remove(at.offset, at.offset + 1);
            }
            self.selection = Selection::collapsed(at);
            return self.record(Edit::Other);
        }
        if at.block + 1 >= self.document.leaf_count() {
            return self;
        }
        match self.document.to_mut().join_with_previous(at.block + 1) {
            Some(_) => {
                self.selection = Selection::collapsed(at);
                self.record(Edit::Other)
            }
            None => self,
        }
    }

    /// Enter: split the current leaf block at the cursor.
    #[must_use]
    pub fn split_block(self) -> Self {
        let mut change = if self.selection.is_expanded() {
            self.delete_selection()
        } else {
            self
        };
        let at = change.selection.focus();
        if change.document.to_mut().split_leaf(at.block, at.offset) {
            change.selection = Selection::collapsed(Point::new(at.block + 1, 0));
            return change.record(Edit::Other);
        }
        change
    }

    /// Produce the new value.
    ///
    /// An edit that left the document and pending marks unchanged does not
    /// create an undo entry.
    pub fn commit(self) -> Value {
        let Self {
            base,
            document,
            selection,
            edit,
        } = self;
        let selection = selection.clamp(&document);
        let document = match document {
            Cow::Borrowed(_) => Arc::clone(base.document_arc()),
            Cow::Owned(doc) if doc == *base.document() => Arc::clone(base.document_arc()),
            Cow::Owned(doc) => Arc::new(doc),
        };

        let mut history = base.history().clone();
        let changed = !Arc::ptr_eq(&document, base.document_arc())
            || selection.marks() != base.selection().marks();
        match edit {
            Some(edit) if changed => {
                let merges = matches!(
                    edit,
                    Edit::Typing { from } if history.typing_at == Some(from)
                );
                if !merges {
                    history.push_undo(base.snapshot());
                }
                history.redos.clear();
                history.typing_at = match edit {
                    Edit::Typing { .. } => Some(selection.focus()),
                    Edit::Other => None,
                };
                tracing::trace!(
                    undos = history.undos.len(),
                    merged = merges,
                    "change committed"
                );
            }
            Some(_) => {}
            None => {
                if selection.focus() != base.selection().focus() {
                    history.typing_at = None;
                }
            }
        }
        Value::from_parts(document, selection, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, Leaf, Text};

    fn paragraphs(texts: &[&str]) -> Value {
        Value::new(Document::new(
            texts
                .iter()
                .map(|t| Block::leaf(BlockType::Paragraph, Text::plain(t)))
                .collect(),
        ))
    }

    fn at(value: &Value, block: usize, offset: usize) -> Value {
        value.change().move_to(Point::new(block, offset)).commit()
    }

    #[test]
    fn test_selection_changes_do_not_create_history() {
        let value = paragraphs(&["hello"]);
        let moved = value.change().move_focus(Movement::LineEnd, false).commit();
        assert_eq!(moved.selection().focus(), Point::new(0, 5));
        assert_eq!(moved.undo_len(), 0);
    }

    #[test]
    fn test_toggle_mark_collapsed_sets_pending_marks() {
        let value = paragraphs(&["hello"]);
        let bold = value.change().toggle_mark(Mark::Bold).commit();
        assert!(bold.active_marks().contains(&Mark::Bold));
        assert_eq!(bold.document(), value.document());
        assert_eq!(bold.undo_len(), 1);

        let typed = bold.change().insert_text("X").commit();
        let text = typed.document().leaf_text(0).unwrap();
        assert_eq!(text.leaves()[0], Leaf::marked("X", [Mark::Bold]));
        assert!(typed.selection().marks().is_none());
    }

    #[test]
    fn test_toggle_mark_expanded_adds_then_removes() {
        let value = paragraphs(&["hello world"])
            .change()
            .select(Selection::new(Point::new(0, 0), Point::new(0, 5)))
            .commit();
        let on = value.change().toggle_mark(Mark::Italic).commit();
        assert_eq!(
            on.document().leaf_text(0).unwrap().marks_in(0, 5),
            Some(BTreeSet::from([Mark::Italic]))
        );
        let off = on.change().toggle_mark(Mark::Italic).commit();
        assert_eq!(off.document(), value.document());
    }

    #[test]
    fn test_toggle_mark_partial_range_adds_everywhere() {
        let value = Value::new(Document::new(vec![Block::leaf(
            BlockType::Paragraph,
            Text::new(vec![Leaf::marked("ab", [Mark::Bold]), Leaf::plain("cd")]),
        )]));
        let selected = value
            .change()
            .select(Selection::new(Point::new(0, 0), Point::new(0, 4)))
            .commit();
        let toggled = selected.change().toggle_mark(Mark::Bold).commit();
        assert_eq!(toggled.document().leaf_text(0).unwrap().leaves().len(), 1);
        assert!(toggled.active_marks().contains(&Mark::Bold));
    }

    #[test]
    fn test_noop_edit_creates_no_history() {
        let value = paragraphs(&["hello"]);
        let same = value.change().set_blocks(BlockType::Paragraph).commit();
        assert_eq!(same.undo_len(), 0);
        let unwrapped = value.change().unwrap_block(BlockType::BulletedList).commit();
        assert_eq!(unwrapped.undo_len(), 0);
    }

    #[test]
    fn test_typing_merges_into_one_undo_entry() {
        let value = paragraphs(&[""]);
        let typed = "abc"
            .chars()
            .fold(value.clone(), |v, c| v.change().insert_text(&c.to_string()).commit());
        assert_eq!(typed.document().plain_text(), "abc");
        assert_eq!(typed.undo_len(), 1);
        assert_eq!(typed.undo().document(), value.document());
    }

    #[test]
    fn test_moving_cursor_breaks_typing_merge() {
        let value = paragraphs(&["xy"]);
        let first = at(&value, 0, 1).change().insert_text("a").commit();
        let moved = first.change().move_focus(Movement::LineEnd, false).commit();
        let second = moved.change().insert_text("b").commit();
        assert_eq!(second.document().plain_text(), "xayb");
        assert_eq!(second.undo_len(), 2);
    }

    #[test]
    fn test_insert_replaces_expanded_selection() {
        let value = paragraphs(&["hello world"])
            .change()
            .select(Selection::new(Point::new(0, 6), Point::new(0, 11)))
            .commit();
        let next = value.change().insert_text("there").commit();
        assert_eq!(next.document().plain_text(), "hello there");
        assert_eq!(next.selection().focus(), Point::new(0, 11));
    }

    #[test]
    fn test_delete_selection_across_blocks_joins_ends() {
        let value = paragraphs(&["abc", "middle", "xyz"])
            .change()
            .select(Selection::new(Point::new(0, 1), Point::new(2, 2)))
            .commit();
        let next = value.change().delete_selection().commit();
        assert_eq!(next.document().plain_text(), "az");
        assert_eq!(next.selection().focus(), Point::new(0, 1));
    }

    #[test]
    fn test_delete_backward_joins_blocks_at_start() {
        let value = at(&paragraphs(&["ab", "cd"]), 1, 0);
        let next = value.change().delete_backward().commit();
        assert_eq!(next.document().plain_text(), "abcd");
        assert_eq!(next.selection().focus(), Point::new(0, 2));
    }

    #[test]
    fn test_delete_backward_at_document_start_is_noop() {
        let value = paragraphs(&["ab"]);
        let next = value.change().delete_backward().commit();
        assert_eq!(next, value);
        assert_eq!(next.undo_len(), 0);
    }

    #[test]
    fn test_delete_forward_removes_next_char_and_joins() {
        let value = at(&paragraphs(&["ab", "cd"]), 0, 1);
        let next = value.change().delete_forward().commit();
        assert_eq!(next.document().plain_text(), "a\ncd");
        let joined = next.change().delete_forward().commit();
        assert_eq!(joined.document().plain_text(), "acd");
        assert_eq!(joined.selection().focus(), Point::new(0, 1));
    }

    #[test]
    fn test_split_block_keeps_type() {
        let value = at(&paragraphs(&["hello"]), 0, 2)
            .change()
            .set_blocks(BlockType::HeadingOne)
            .commit();
        let next = value.change().split_block().commit();
        assert_eq!(next.document().plain_text(), "he\nllo");
        assert_eq!(next.document().leaf(1).unwrap().kind, BlockType::HeadingOne);
        assert_eq!(next.selection().focus(), Point::new(1, 0));
    }

    #[test]
    fn test_move_focus_wraps_between_blocks() {
        let value = at(&paragraphs(&["ab", "cd"]), 0, 2);
        let right = value.change().move_focus(Movement::Right, false).commit();
        assert_eq!(right.selection().focus(), Point::new(1, 0));
        let left = right.change().move_focus(Movement::Left, false).commit();
        assert_eq!(left.selection().focus(), Point::new(0, 2));
    }

    #[test]
    fn test_move_focus_extend_keeps_anchor() {
        let value = paragraphs(&["hello"]);
        let extended = value
            .change()
            .move_focus(Movement::Right, true)
            .move_focus(Movement::Right, true)
            .commit();
        assert_eq!(extended.selection().anchor(), Point::new(0, 0));
        assert_eq!(extended.selection().focus(), Point::new(0, 2));

        let collapsed = extended.change().move_focus(Movement::Left, false).commit();
        assert!(collapsed.selection().is_collapsed());
        assert_eq!(collapsed.selection().focus(), Point::new(0, 0));
    }

    #[test]
    fn test_select_all_spans_document() {
        let value = paragraphs(&["ab", "cde"]).change().select_all().commit();
        assert_eq!(value.selection().start(), Point::new(0, 0));
        assert_eq!(value.selection().end(), Point::new(1, 3));
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let value = paragraphs(&["ab"]);
        let edited = value.change().set_blocks(BlockType::HeadingOne).commit();
        let undone = edited.undo();
        assert_eq!(undone.redo_len(), 1);
        let other = undone.change().set_blocks(BlockType::BlockQuote).commit();
        assert_eq!(other.redo_len(), 0);
    }
}
