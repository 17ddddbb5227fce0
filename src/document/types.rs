//! Core document types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::text::Text;

/// Character-level formatting applied to a run of text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mark {
    Bold,
    Italic,
    Underlined,
    Code,
}

impl Mark {
    pub const ALL: [Self; 4] = [Self::Bold, Self::Italic, Self::Underlined, Self::Code];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underlined => "underlined",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural type of a block node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    BlockQuote,
    BulletedList,
    NumberedList,
    ListItem,
}

impl BlockType {
    /// The type blocks fall back to when a block button is toggled off.
    pub const DEFAULT: Self = Self::Paragraph;

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::HeadingOne => "heading-one",
            Self::HeadingTwo => "heading-two",
            Self::BlockQuote => "block-quote",
            Self::BulletedList => "bulleted-list",
            Self::NumberedList => "numbered-list",
            Self::ListItem => "list-item",
        }
    }

    /// Whether this is one of the two list container types.
    pub const fn is_list(self) -> bool {
        matches!(self, Self::BulletedList | Self::NumberedList)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a block holds: child blocks, or text when it is a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Blocks(Vec<Block>),
    Text(Text),
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockType,
    pub content: Content,
}

impl Block {
    /// Create a leaf block holding text.
    pub const fn leaf(kind: BlockType, text: Text) -> Self {
        Self {
            kind,
            content: Content::Text(text),
        }
    }

    /// Create a container block holding other blocks.
    pub const fn container(kind: BlockType, children: Vec<Self>) -> Self {
        Self {
            kind,
            content: Content::Blocks(children),
        }
    }

    pub const fn is_leaf(&self) -> bool {
        matches!(self.content, Content::Text(_))
    }

    pub const fn text(&self) -> Option<&Text> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Blocks(_) => None,
        }
    }

    pub const fn text_mut(&mut self) -> Option<&mut Text> {
        match &mut self.content {
            Content::Text(text) => Some(text),
            Content::Blocks(_) => None,
        }
    }

    /// Child blocks (empty for a leaf).
    pub fn children(&self) -> &[Self] {
        match &self.content {
            Content::Blocks(children) => children,
            Content::Text(_) => &[],
        }
    }

    pub const fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
        match &mut self.content {
            Content::Blocks(children) => Some(children),
            Content::Text(_) => None,
        }
    }

    /// Plain text of this block, leaf blocks joined by newlines.
    pub fn plain_text(&self) -> String {
        match &self.content {
            Content::Text(text) => text.as_string(),
            Content::Blocks(children) => children
                .iter()
                .map(Self::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}
