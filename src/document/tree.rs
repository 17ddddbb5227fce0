//! The block tree and its structural operations.
//!
//! Blocks are addressed by [`Path`]s (child indices from the root). Leaf
//! blocks are additionally addressed by their index in document order, which
//! is what selections use: wrapping, unwrapping and retyping blocks never
//! change the order of leaves, so selections survive structural edits.

use std::ops::RangeInclusive;

use super::text::Text;
use super::types::{Block, BlockType, Content};

/// Child indices from the document root down to a block.
pub type Path = Vec<usize>;

/// The root of a rich-text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            nodes: vec![Block::leaf(BlockType::DEFAULT, Text::default())],
        }
    }
}

impl Document {
    /// Create a document from top-level blocks.
    ///
    /// An empty list yields a single empty paragraph.
    pub fn new(nodes: Vec<Block>) -> Self {
        let doc = Self { nodes };
        if doc.leaf_count() == 0 {
            return Self::default();
        }
        doc
    }

    /// Top-level blocks.
    pub fn nodes(&self) -> &[Block] {
        &self.nodes
    }

    /// Paths of every leaf block in document order.
    pub fn leaf_paths(&self) -> Vec<Path> {
        fn collect(blocks: &[Block], prefix: &mut Path, out: &mut Vec<Path>) {
            for (idx, block) in blocks.iter().enumerate() {
                prefix.push(idx);
                match &block.content {
                    Content::Text(_) => out.push(prefix.clone()),
                    Content::Blocks(children) => collect(children, prefix, out),
                }
                prefix.pop();
            }
        }
        let mut out = Vec::new();
        collect(&self.nodes, &mut Vec::new(), &mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_paths().len()
    }

    /// Path of the leaf block at `index` in document order.
    pub fn leaf_path(&self, index: usize) -> Option<Path> {
        self.leaf_paths().into_iter().nth(index)
    }

    /// The leaf block at `index` in document order.
    pub fn leaf(&self, index: usize) -> Option<&Block> {
        self.leaf_path(index).and_then(|path| self.block(&path))
    }

    /// Text of the leaf block at `index`.
    pub fn leaf_text(&self, index: usize) -> Option<&Text> {
        self.leaf(index).and_then(Block::text)
    }

    /// Char length of the leaf block at `index` (0 when out of range).
    pub fn leaf_len(&self, index: usize) -> usize {
        self.leaf_text(index).map_or(0, Text::len)
    }

    /// The block at `path`.
    pub fn block(&self, path: &[usize]) -> Option<&Block> {
        let (first, rest) = path.split_first()?;
        let mut block = self.nodes.get(*first)?;
        for idx in rest {
            block = block.children().get(*idx)?;
        }
        Some(block)
    }

    pub(crate) fn block_mut(&mut self, path: &[usize]) -> Option<&mut Block> {
        let (first, rest) = path.split_first()?;
        let mut block = self.nodes.get_mut(*first)?;
        for idx in rest {
            block = block.children_mut()?.get_mut(*idx)?;
        }
        Some(block)
    }

    /// Children of the block at `parent`, or the top-level blocks for an
    /// empty path.
    fn children_mut(&mut self, parent: &[usize]) -> Option<&mut Vec<Block>> {
        if parent.is_empty() {
            return Some(&mut self.nodes);
        }
        self.block_mut(parent)?.children_mut()
    }

    pub(crate) fn leaf_text_mut(&mut self, index: usize) -> Option<&mut Text> {
        let path = self.leaf_path(index)?;
        self.block_mut(&path)?.text_mut()
    }

    /// Parent block of the block at `path`; `None` for top-level blocks.
    pub fn parent(&self, path: &[usize]) -> Option<&Block> {
        let (_, parent) = path.split_last()?;
        self.block(parent)
    }

    /// Closest ancestor of the block at `path` (excluding itself) matching
    /// `predicate`.
    pub fn closest(&self, path: &[usize], predicate: impl Fn(&Block) -> bool) -> Option<&Block> {
        self.closest_path(path, predicate)
            .and_then(|ancestor| self.block(&ancestor))
    }

    /// Path of the closest ancestor matching `predicate`.
    pub fn closest_path(
        &self,
        path: &[usize],
        predicate: impl Fn(&Block) -> bool,
    ) -> Option<Path> {
        (1..path.len())
            .rev()
            .map(|depth| &path[..depth])
            .find(|ancestor| self.block(ancestor).is_some_and(&predicate))
            .map(<[usize]>::to_vec)
    }

    /// Plain text of the whole document, one leaf block per line.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Set the type of the leaf blocks in `leaves`.
    pub(crate) fn set_kind(&mut self, leaves: RangeInclusive<usize>, kind: BlockType) {
        let paths = self.leaf_paths();
        for path in paths.get(leaves).unwrap_or_default() {
            if let Some(block) = self.block_mut(path) {
                block.kind = kind;
            }
        }
    }

    /// Wrap the blocks spanning `leaves` in a new `kind` container.
    ///
    /// The wrapped blocks are the children of the deepest common ancestor
    /// of the first and last leaf; a single leaf is wrapped on its own.
    pub(crate) fn wrap(&mut self, leaves: RangeInclusive<usize>, kind: BlockType) {
        let paths = self.leaf_paths();
        let (Some(first), Some(last)) = (paths.get(*leaves.start()), paths.get(*leaves.end()))
        else {
            return;
        };
        let depth = if first == last {
            first.len() - 1
        } else {
            first.iter().zip(last).take_while(|(a, b)| a == b).count()
        };
        let parent = first[..depth].to_vec();
        let (from, to) = (first[depth], last[depth]);
        if let Some(siblings) = self.children_mut(&parent) {
            let wrapped: Vec<Block> = siblings.drain(from..=to).collect();
            siblings.insert(from, Block::container(kind, wrapped));
        }
    }

    /// Lift the blocks spanning `leaves` out of their closest `kind`
    /// ancestors.
    ///
    /// A wrapper whose children are only partly selected is split around
    /// the selected children; wrappers left empty disappear.
    pub(crate) fn unwrap(&mut self, leaves: RangeInclusive<usize>, kind: BlockType) {
        let paths = self.leaf_paths();
        let mut wrappers: Vec<Path> = paths
            .get(leaves.clone())
            .unwrap_or_default()
            .iter()
            .filter_map(|path| self.closest_path(path, |block| block.kind == kind))
            .collect();
        wrappers.sort();
        wrappers.dedup();
        // Later paths first: lifting a wrapper only shifts what comes after it.
        for wrapper in wrappers.iter().rev() {
            self.lift_children(wrapper, leaves.clone());
        }
    }

    fn lift_children(&mut self, wrapper: &[usize], leaves: RangeInclusive<usize>) {
        let paths = self.leaf_paths();
        let selected = paths.get(leaves).unwrap_or_default();
        let depth = wrapper.len();
        let is_selected = |child: usize| {
            selected
                .iter()
                .any(|path| path.len() > depth && path.starts_with(wrapper) && path[depth] == child)
        };
        let Some(child_count) = self.block(wrapper).map(|block| block.children().len()) else {
            return;
        };
        let Some(first) = (0..child_count).find(|&child| is_selected(child)) else {
            return;
        };
        let last = (0..child_count)
            .rev()
            .find(|&child| is_selected(child))
            .unwrap_or(first);

        let Some((&index, parent)) = wrapper.split_last() else {
            return;
        };
        let Some(siblings) = self.children_mut(parent) else {
            return;
        };
        let removed = siblings.remove(index);
        let mut children = match removed.content {
            Content::Blocks(children) => children,
            content @ Content::Text(_) => {
                siblings.insert(index, Block { kind: removed.kind, content });
                return;
            }
        };
        let after = children.split_off(last + 1);
        let lifted = children.split_off(first);
        let before = children;

        let mut replacement = Vec::with_capacity(lifted.len() + 2);
        if !before.is_empty() {
            replacement.push(Block::container(removed.kind, before));
        }
        replacement.extend(lifted);
        if !after.is_empty() {
            replacement.push(Block::container(removed.kind, after));
        }
        siblings.splice(index..index, replacement);
    }

    /// Split the leaf at `index` at `offset`; the tail becomes a new sibling
    /// leaf of the same type.
    pub(crate) fn split_leaf(&mut self, index: usize, offset: usize) -> bool {
        let Some(path) = self.leaf_path(index) else {
            return false;
        };
        let Some(block) = self.block_mut(&path) else {
            return false;
        };
        let kind = block.kind;
        let Some(tail) = block.text_mut().map(|text| text.split_off(offset)) else {
            return false;
        };
        let Some((&position, parent)) = path.split_last() else {
            return false;
        };
        match self.children_mut(parent) {
            Some(siblings) => {
                siblings.insert(position + 1, Block::leaf(kind, tail));
                true
            }
            None => false,
        }
    }

    /// Move the text of the leaf at `index` onto the end of the previous
    /// leaf and remove it. Returns the join offset in the previous leaf.
    pub(crate) fn join_with_previous(&mut self, index: usize) -> Option<usize> {
        let previous = index.checked_sub(1)?;
        let paths = self.leaf_paths();
        let path = paths.get(index)?;
        let moved = self.block(path)?.text()?.clone();
        let target = self.block_mut(paths.get(previous)?)?.text_mut()?;
        let offset = target.len();
        target.append(moved);
        self.remove_block(path);
        Some(offset)
    }

    /// Remove the leaf blocks in `leaves`, keeping at least one leaf.
    pub(crate) fn remove_leaves(&mut self, leaves: RangeInclusive<usize>) {
        let paths = self.leaf_paths();
        if leaves.start() == &0 && leaves.end() + 1 >= paths.len() {
            return;
        }
        for path in paths.get(leaves).unwrap_or_default().iter().rev() {
            self.remove_block(path);
        }
    }

    /// Remove the block at `path` and any ancestors left without children.
    fn remove_block(&mut self, path: &[usize]) {
        let Some((&index, parent)) = path.split_last() else {
            return;
        };
        if let Some(siblings) = self.children_mut(parent)
            && index < siblings.len()
        {
            siblings.remove(index);
        }
        let emptied = self
            .block(parent)
            .is_some_and(|block| matches!(&block.content, Content::Blocks(c) if c.is_empty()));
        if emptied {
            self.remove_block(parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(text: &str) -> Block {
        Block::leaf(BlockType::Paragraph, Text::plain(text))
    }

    fn item(text: &str) -> Block {
        Block::leaf(BlockType::ListItem, Text::plain(text))
    }

    fn list(kind: BlockType, items: Vec<Block>) -> Block {
        Block::container(kind, items)
    }

    #[test]
    fn test_empty_document_gets_a_paragraph() {
        let doc = Document::new(Vec::new());
        assert_eq!(doc.leaf_count(), 1);
        assert_eq!(doc.leaf(0).unwrap().kind, BlockType::Paragraph);
    }

    #[test]
    fn test_leaf_paths_are_in_document_order() {
        let doc = Document::new(vec![
            para("a"),
            list(BlockType::BulletedList, vec![item("b"), item("c")]),
            para("d"),
        ]);
        assert_eq!(
            doc.leaf_paths(),
            vec![vec![0], vec![1, 0], vec![1, 1], vec![2]]
        );
        assert_eq!(doc.leaf_text(2).unwrap().as_string(), "c");
    }

    #[test]
    fn test_parent_and_closest() {
        let doc = Document::new(vec![list(
            BlockType::NumberedList,
            vec![list(BlockType::BulletedList, vec![item("x")])],
        )]);
        let path = doc.leaf_path(0).unwrap();
        assert_eq!(doc.parent(&path).unwrap().kind, BlockType::BulletedList);
        let closest = doc
            .closest(&path, |block| block.kind == BlockType::NumberedList)
            .unwrap();
        assert_eq!(closest.kind, BlockType::NumberedList);
        assert!(doc.parent(&[0]).is_none());
        assert!(doc.closest(&path, |block| block.kind == BlockType::BlockQuote).is_none());
    }

    #[test]
    fn test_wrap_single_leaf() {
        let mut doc = Document::new(vec![para("a"), para("b")]);
        doc.wrap(1..=1, BlockType::BulletedList);
        assert_eq!(doc.nodes()[1].kind, BlockType::BulletedList);
        assert_eq!(doc.leaf_path(1).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_wrap_range_uses_common_ancestor() {
        let mut doc = Document::new(vec![para("a"), para("b"), para("c")]);
        doc.wrap(0..=1, BlockType::BlockQuote);
        assert_eq!(doc.nodes().len(), 2);
        assert_eq!(doc.nodes()[0].children().len(), 2);
        assert_eq!(doc.plain_text(), "a\nb\nc");
    }

    #[test]
    fn test_unwrap_whole_wrapper() {
        let mut doc = Document::new(vec![list(
            BlockType::BulletedList,
            vec![item("a"), item("b")],
        )]);
        doc.unwrap(0..=1, BlockType::BulletedList);
        assert_eq!(doc.nodes().len(), 2);
        assert!(doc.nodes().iter().all(Block::is_leaf));
    }

    #[test]
    fn test_unwrap_middle_splits_wrapper() {
        let mut doc = Document::new(vec![list(
            BlockType::NumberedList,
            vec![item("a"), item("b"), item("c")],
        )]);
        doc.unwrap(1..=1, BlockType::NumberedList);
        let kinds: Vec<_> = doc.nodes().iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockType::NumberedList,
                BlockType::ListItem,
                BlockType::NumberedList
            ]
        );
        assert_eq!(doc.plain_text(), "a\nb\nc");
    }

    #[test]
    fn test_unwrap_other_kind_is_noop() {
        let mut doc = Document::new(vec![list(BlockType::BulletedList, vec![item("a")])]);
        let before = doc.clone();
        doc.unwrap(0..=0, BlockType::NumberedList);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_split_leaf_keeps_type_and_parent() {
        let mut doc = Document::new(vec![list(BlockType::BulletedList, vec![item("hello")])]);
        assert!(doc.split_leaf(0, 2));
        assert_eq!(doc.leaf_paths(), vec![vec![0, 0], vec![0, 1]]);
        assert_eq!(doc.leaf(1).unwrap().kind, BlockType::ListItem);
        assert_eq!(doc.leaf_text(1).unwrap().as_string(), "llo");
    }

    #[test]
    fn test_join_with_previous_prunes_empty_container() {
        let mut doc = Document::new(vec![
            para("ab"),
            list(BlockType::BulletedList, vec![item("cd")]),
        ]);
        assert_eq!(doc.join_with_previous(1), Some(2));
        assert_eq!(doc.nodes().len(), 1);
        assert_eq!(doc.plain_text(), "abcd");
        assert_eq!(doc.join_with_previous(0), None);
    }

    #[test]
    fn test_remove_leaves_never_empties_document() {
        let mut doc = Document::new(vec![para("a"), para("b")]);
        doc.remove_leaves(0..=1);
        assert_eq!(doc.leaf_count(), 2);
        doc.remove_leaves(1..=1);
        assert_eq!(doc.plain_text(), "a");
    }
}
