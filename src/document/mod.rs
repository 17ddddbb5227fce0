//! The rich-text document model.
//!
//! This module handles:
//! - The block tree with marked text runs
//! - Immutable values carrying selection and undo/redo history
//! - Building new values through [`Change`]
//! - Slate-style JSON loading and saving

mod change;
mod json;
mod selection;
mod text;
mod tree;
mod types;
mod value;

pub use change::Change;
pub use json::DocumentError;
pub use selection::{Movement, Point, Selection};
pub use text::{Leaf, Text};
pub use tree::{Document, Path};
pub use types::{Block, BlockType, Content, Mark};
pub use value::{DEFAULT_HISTORY_LIMIT, Value};

/// The document shown at startup.
pub const INITIAL_VALUE_JSON: &str = include_str!("../../assets/initial_value.json");
