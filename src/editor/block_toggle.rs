//! Block button transitions.
//!
//! A block button press is classified by where the selection sits relative
//! to lists, then turned into a [`BlockToggle`] plan that is applied to a
//! [`Change`]. Keeping the decision separate from the edit lets the
//! transition table be tested without building documents.

use crate::document::{BlockType, Change, Value};

/// The two list container flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    pub const fn from_block(kind: BlockType) -> Option<Self> {
        match kind {
            BlockType::BulletedList => Some(Self::Bulleted),
            BlockType::NumberedList => Some(Self::Numbered),
            _ => None,
        }
    }

    pub const fn block_type(self) -> BlockType {
        match self {
            Self::Bulleted => BlockType::BulletedList,
            Self::Numbered => BlockType::NumberedList,
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Bulleted => Self::Numbered,
            Self::Numbered => Self::Bulleted,
        }
    }
}

/// Where the selection sits relative to lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// No selected block is a list item.
    Outside,
    /// In a list, and every selected block is inside the requested flavor.
    InRequested,
    /// In a list, but not (entirely) inside the requested flavor.
    InOther,
}

impl ListState {
    /// Classify the selection of `value`. `requested` is the list flavor of
    /// the pressed button, if it is a list button.
    pub fn classify(value: &Value, requested: Option<ListKind>) -> Self {
        let doc = value.document();
        let paths = value.block_paths();
        let in_list = paths
            .iter()
            .filter_map(|path| doc.block(path))
            .any(|block| block.kind == BlockType::ListItem);
        if !in_list {
            return Self::Outside;
        }
        let Some(list) = requested else {
            return Self::InOther;
        };
        let inside_requested = paths.iter().all(|path| {
            doc.closest(path, |block| block.kind == list.block_type())
                .is_some()
        });
        if inside_requested {
            Self::InRequested
        } else {
            Self::InOther
        }
    }
}

/// What a block button press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockToggle {
    /// Retype the selected blocks.
    SetBlocks(BlockType),
    /// Retype the selected blocks and lift them out of any list.
    SetBlocksAndLeaveList(BlockType),
    /// Turn list items back into paragraphs outside any list.
    ExitList,
    /// Move the selected items from one list flavor to the other.
    SwitchList { from: ListKind, to: ListKind },
    /// Turn the selected blocks into items of a new list.
    EnterList(ListKind),
}

/// Decide what pressing the `kind` button does.
///
/// `is_active` is whether every selected block already has `kind`; it only
/// matters for non-list buttons, which toggle back to the default type.
pub const fn plan_block_toggle(kind: BlockType, is_active: bool, state: ListState) -> BlockToggle {
    match ListKind::from_block(kind) {
        None => {
            let target = if is_active { BlockType::DEFAULT } else { kind };
            match state {
                ListState::Outside => BlockToggle::SetBlocks(target),
                ListState::InRequested | ListState::InOther => {
                    BlockToggle::SetBlocksAndLeaveList(target)
                }
            }
        }
        Some(list) => match state {
            ListState::InRequested => BlockToggle::ExitList,
            ListState::InOther => BlockToggle::SwitchList {
                from: list.other(),
                to: list,
            },
            ListState::Outside => BlockToggle::EnterList(list),
        },
    }
}

impl BlockToggle {
    /// Apply the plan to a pending change.
    pub fn apply(self, change: Change<'_>) -> Change<'_> {
        match self {
            Self::SetBlocks(kind) => change.set_blocks(kind),
            Self::SetBlocksAndLeaveList(kind) => leave_lists(change.set_blocks(kind)),
            Self::ExitList => leave_lists(change.set_blocks(BlockType::DEFAULT)),
            // Both flavors are lifted so a partly listed selection ends up
            // under exactly one list.
            Self::SwitchList { to, .. } => leave_lists(change).wrap_block(to.block_type()),
            Self::EnterList(list) => change
                .set_blocks(BlockType::ListItem)
                .wrap_block(list.block_type()),
        }
    }
}

fn leave_lists(change: Change<'_>) -> Change<'_> {
    change
        .unwrap_block(BlockType::BulletedList)
        .unwrap_block(BlockType::NumberedList)
}
