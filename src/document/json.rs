//! Slate-style JSON serialization of document values.
//!
//! ```json
//! {"document": {"nodes": [
//!   {"object": "block", "type": "paragraph", "nodes": [
//!     {"object": "text", "leaves": [{"text": "hi", "marks": [{"type": "bold"}]}]}
//!   ]}
//! ]}}
//! ```
//!
//! Unknown keys (`data`, `key`, `object` on leaves and marks) are ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::text::{Leaf, Text};
use super::tree::Document;
use super::types::{Block, BlockType, Content, Mark};
use super::value::Value;

/// Errors loading a serialized document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document has no blocks")]
    Empty,

    #[error("Text nodes are not allowed at the document root")]
    TextAtRoot,

    #[error("Block '{kind}' mixes text and block children")]
    MixedContent { kind: BlockType },
}

#[derive(Debug, Serialize, Deserialize)]
struct RawValue {
    document: RawDocument,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawDocument {
    #[serde(default)]
    nodes: Vec<RawNode>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "lowercase")]
enum RawNode {
    Block {
        #[serde(rename = "type")]
        kind: BlockType,
        #[serde(default)]
        nodes: Vec<RawNode>,
    },
    Text {
        #[serde(default)]
        leaves: Vec<RawLeaf>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct RawLeaf {
    #[serde(default)]
    text: String,
    #[serde(default)]
    marks: Vec<RawMark>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawMark {
    #[serde(rename = "type")]
    kind: Mark,
}

impl Value {
    /// Load a value from Slate-style JSON, normalizing it.
    ///
    /// Several text nodes in one block are merged; list blocks without
    /// children are dropped; other blocks without children become empty
    /// leaf blocks.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] for malformed JSON or an invalid tree.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let raw: RawValue = serde_json::from_str(json)?;
        let mut nodes = Vec::with_capacity(raw.document.nodes.len());
        for node in raw.document.nodes {
            match node {
                RawNode::Text { .. } => return Err(DocumentError::TextAtRoot),
                RawNode::Block { kind, nodes: children } => {
                    if let Some(block) = convert_block(kind, children, None)? {
                        nodes.push(block);
                    }
                }
            }
        }
        if nodes.is_empty() {
            return Err(DocumentError::Empty);
        }
        let document = Document::new(nodes);
        tracing::debug!(leaves = document.leaf_count(), "document loaded");
        Ok(Self::new(document))
    }

    /// Serialize the document (not the selection or history) as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        let raw = RawValue {
            document: RawDocument {
                nodes: self.document().nodes().iter().map(raw_block).collect(),
            },
        };
        Ok(serde_json::to_string_pretty(&raw)?)
    }
}

fn convert_block(
    kind: BlockType,
    children: Vec<RawNode>,
    parent: Option<BlockType>,
) -> Result<Option<Block>, DocumentError> {
    if kind == BlockType::ListItem && !parent.is_some_and(BlockType::is_list) {
        tracing::warn!(parent = ?parent, "list-item outside of a list");
    }
    if children.is_empty() {
        if kind.is_list() {
            return Ok(None);
        }
        return Ok(Some(Block::leaf(kind, Text::default())));
    }

    let texts = children
        .iter()
        .filter(|node| matches!(node, RawNode::Text { .. }))
        .count();
    if texts == children.len() {
        let leaves = children
            .into_iter()
            .flat_map(|node| match node {
                RawNode::Text { leaves } => leaves,
                RawNode::Block { .. } => Vec::new(),
            })
            .map(|leaf| Leaf::marked(leaf.text, leaf.marks.into_iter().map(|m| m.kind)))
            .collect();
        return Ok(Some(Block::leaf(kind, Text::new(leaves))));
    }
    if texts > 0 {
        return Err(DocumentError::MixedContent { kind });
    }

    let mut blocks = Vec::with_capacity(children.len());
    for node in children {
        if let RawNode::Block {
            kind: child,
            nodes,
        } = node
            && let Some(block) = convert_block(child, nodes, Some(kind))?
        {
            blocks.push(block);
        }
    }
    if blocks.is_empty() {
        return Ok(None);
    }
    Ok(Some(Block::container(kind, blocks)))
}

fn raw_block(block: &Block) -> RawNode {
    let nodes = match &block.content {
        Content::Blocks(children) => children.iter().map(raw_block).collect(),
        Content::Text(text) => vec![RawNode::Text {
            leaves: text
                .leaves()
                .iter()
                .map(|leaf| RawLeaf {
                    text: leaf.text.clone(),
                    marks: leaf.marks.iter().map(|&kind| RawMark { kind }).collect(),
                })
                .collect(),
        }],
    };
    RawNode::Block {
        kind: block.kind,
        nodes,
    }
}
