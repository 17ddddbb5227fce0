//! Inline text runs.
//!
//! A leaf block's content is a [`Text`]: an ordered list of [`Leaf`] runs,
//! each carrying a set of marks. Offsets are counted in `char`s.

use std::collections::BTreeSet;

use super::types::Mark;

/// A run of text sharing one set of marks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leaf {
    pub text: String,
    pub marks: BTreeSet<Mark>,
}

impl Leaf {
    /// Create an unmarked leaf.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: BTreeSet::new(),
        }
    }

    /// Create a leaf carrying the given marks.
    pub fn marked(text: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        Self {
            text: text.into(),
            marks: marks.into_iter().collect(),
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The text content of a leaf block.
///
/// Always normalized: no empty leaves (except the single leaf of an empty
/// text) and no two neighbouring leaves with the same marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    leaves: Vec<Leaf>,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            leaves: vec![Leaf::default()],
        }
    }
}

impl Text {
    /// Build a text from leaves, normalizing them.
    pub fn new(leaves: Vec<Leaf>) -> Self {
        let mut text = Self { leaves };
        text.normalize();
        text
    }

    /// Build an unmarked text.
    pub fn plain(text: &str) -> Self {
        Self::new(vec![Leaf::plain(text)])
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.leaves.iter().map(Leaf::char_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.iter().all(|leaf| leaf.text.is_empty())
    }

    /// The concatenated string content.
    pub fn as_string(&self) -> String {
        self.leaves.iter().map(|leaf| leaf.text.as_str()).collect()
    }

    /// Marks in effect at a collapsed position.
    ///
    /// Uses the character before `offset`, or the first character when the
    /// position is at the start of the text.
    pub fn marks_at(&self, offset: usize) -> BTreeSet<Mark> {
        let target = offset.saturating_sub(1);
        let mut pos = 0;
        for leaf in &self.leaves {
            let len = leaf.char_len();
            if target < pos + len {
                return leaf.marks.clone();
            }
            pos += len;
        }
        self.leaves
            .last()
            .map(|leaf| leaf.marks.clone())
            .unwrap_or_default()
    }

    /// Marks shared by every character in `start..end`.
    ///
    /// Returns `None` when the range covers no characters.
    pub fn marks_in(&self, start: usize, end: usize) -> Option<BTreeSet<Mark>> {
        if start >= end {
            return None;
        }
        let mut shared: Option<BTreeSet<Mark>> = None;
        let mut pos = 0;
        for leaf in &self.leaves {
            let len = leaf.char_len();
            let overlaps = pos < end && start < pos + len;
            if overlaps {
                shared = Some(match shared {
                    None => leaf.marks.clone(),
                    Some(acc) => acc.intersection(&leaf.marks).copied().collect(),
                });
            }
            pos += len;
        }
        shared
    }

    /// Insert `text` at `offset` carrying `marks`.
    pub fn insert(&mut self, offset: usize, text: &str, marks: &BTreeSet<Mark>) {
        if text.is_empty() {
            return;
        }
        let idx = self.split_at(offset);
        self.leaves.insert(
            idx,
            Leaf {
                text: text.to_string(),
                marks: marks.clone(),
            },
        );
        self.normalize();
    }

    /// Remove the characters in `start..end`.
    pub fn remove(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let from = self.split_at(start);
        let to = self.split_at(end);
        self.leaves.drain(from..to);
        self.normalize();
    }

    /// Split at `offset`, keeping the head and returning the tail.
    #[must_use]
    pub fn split_off(&mut self, offset: usize) -> Self {
        let idx = self.split_at(offset);
        let tail = self.leaves.split_off(idx);
        self.normalize();
        Self::new(tail)
    }

    /// Append another text at the end.
    pub fn append(&mut self, other: Self) {
        self.leaves.extend(other.leaves);
        self.normalize();
    }

    /// Add or remove `mark` on the characters in `start..end`.
    pub fn set_mark(&mut self, start: usize, end: usize, mark: Mark, present: bool) {
        if start >= end {
            return;
        }
        let from = self.split_at(start);
        let to = self.split_at(end);
        for leaf in &mut self.leaves[from..to] {
            if present {
                leaf.marks.insert(mark);
            } else {
                leaf.marks.remove(&mark);
            }
        }
        self.normalize();
    }

    /// Ensure a leaf boundary at `offset` and return the index of the leaf
    /// starting there (the leaf count when `offset` is at the end).
    fn split_at(&mut self, offset: usize) -> usize {
        let mut pos = 0;
        for idx in 0..self.leaves.len() {
            if offset == pos {
                return idx;
            }
            let len = self.leaves[idx].char_len();
            if offset < pos + len {
                let leaf = &mut self.leaves[idx];
                let byte = leaf
                    .text
                    .char_indices()
                    .nth(offset - pos)
                    .map_or(leaf.text.len(), |(b, _)| b);
                let tail = Leaf {
                    text: leaf.text.split_off(byte),
                    marks: leaf.marks.clone(),
                };
                self.leaves.insert(idx + 1, tail);
                return idx + 1;
            }
            pos += len;
        }
        self.leaves.len()
    }

    fn normalize(&mut self) {
        let leaves = std::mem::take(&mut self.leaves);
        let fallback = leaves
            .first()
            .map(|leaf| leaf.marks.clone())
            .unwrap_or_default();
        let mut out: Vec<Leaf> = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            if leaf.text.is_empty() {
                continue;
            }
            match out.last_mut() {
                Some(prev) if prev.marks == leaf.marks => prev.text.push_str(&leaf.text),
                _ => out.push(leaf),
            }
        }
        if out.is_empty() {
            out.push(Leaf {
                text: String::new(),
                marks: fallback,
            });
        }
        self.leaves = out;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> BTreeSet<Mark> {
        BTreeSet::from([Mark::Bold])
    }

    #[test]
    fn test_new_merges_equal_neighbours_and_drops_empty() {
        let text = Text::new(vec![
            Leaf::plain("ab"),
            Leaf::plain(""),
            Leaf::plain("cd"),
            Leaf::marked("ef", [Mark::Bold]),
        ]);
        assert_eq!(text.leaves().len(), 2);
        assert_eq!(text.leaves()[0].text, "abcd");
        assert_eq!(text.as_string(), "abcdef");
    }

    #[test]
    fn test_empty_text_keeps_single_leaf() {
        let text = Text::new(Vec::new());
        assert_eq!(text.leaves().len(), 1);
        assert!(text.is_empty());
        assert_eq!(text.len(), 0);
    }

    #[test]
    fn test_len_counts_chars_not_bytes() {
        assert_eq!(Text::plain("café").len(), 4);
    }

    #[test]
    fn test_marks_at_uses_previous_char() {
        let text = Text::new(vec![Leaf::marked("ab", [Mark::Bold]), Leaf::plain("cd")]);
        assert_eq!(text.marks_at(2), bold());
        assert!(text.marks_at(3).is_empty());
        assert_eq!(text.marks_at(0), bold());
    }

    #[test]
    fn test_marks_in_intersects_overlapping_leaves() {
        let text = Text::new(vec![
            Leaf::marked("ab", [Mark::Bold, Mark::Italic]),
            Leaf::marked("cd", [Mark::Bold]),
        ]);
        assert_eq!(text.marks_in(0, 4), Some(bold()));
        assert_eq!(
            text.marks_in(0, 2),
            Some(BTreeSet::from([Mark::Bold, Mark::Italic]))
        );
        assert_eq!(text.marks_in(2, 2), None);
    }

    #[test]
    fn test_insert_with_different_marks_splits_leaf() {
        let mut text = Text::plain("hello");
        text.insert(2, "XY", &bold());
        assert_eq!(text.as_string(), "heXYllo");
        assert_eq!(text.leaves().len(), 3);
        assert_eq!(text.leaves()[1].marks, bold());
    }

    #[test]
    fn test_insert_with_same_marks_extends_leaf() {
        let mut text = Text::plain("hello");
        text.insert(5, "!", &BTreeSet::new());
        assert_eq!(text.leaves().len(), 1);
        assert_eq!(text.as_string(), "hello!");
    }

    #[test]
    fn test_remove_across_leaves() {
        let mut text = Text::new(vec![Leaf::marked("abc", [Mark::Bold]), Leaf::plain("def")]);
        text.remove(1, 5);
        assert_eq!(text.as_string(), "af");
        assert_eq!(text.leaves().len(), 2);
    }

    #[test]
    fn test_remove_everything_leaves_empty_text() {
        let mut text = Text::plain("abc");
        text.remove(0, 3);
        assert!(text.is_empty());
        assert_eq!(text.leaves().len(), 1);
    }

    #[test]
    fn test_split_off_and_append() {
        let mut text = Text::new(vec![Leaf::marked("ab", [Mark::Code]), Leaf::plain("cd")]);
        let tail = text.split_off(1);
        assert_eq!(text.as_string(), "a");
        assert_eq!(tail.as_string(), "bcd");
        assert_eq!(tail.leaves()[0].marks, BTreeSet::from([Mark::Code]));

        text.append(tail);
        assert_eq!(text.as_string(), "abcd");
        assert_eq!(text.leaves().len(), 2);
    }

    #[test]
    fn test_set_mark_then_clear_restores_single_leaf() {
        let mut text = Text::plain("hello world");
        text.set_mark(0, 5, Mark::Bold, true);
        assert_eq!(text.leaves().len(), 2);
        assert_eq!(text.marks_in(0, 5), Some(bold()));

        text.set_mark(0, 5, Mark::Bold, false);
        assert_eq!(text, Text::plain("hello world"));
    }

    #[test]
    fn test_set_mark_on_multibyte_boundary() {
        let mut text = Text::plain("açaí");
        text.set_mark(1, 3, Mark::Italic, true);
        assert_eq!(text.leaves()[0].text, "a");
        assert_eq!(text.leaves()[1].text, "ça");
        assert_eq!(text.leaves()[2].text, "í");
    }
}
