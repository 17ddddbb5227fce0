//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Screen regions and word-wrapped document lines
//! - [`style`]: Block, mark and button styling
//! - [`toolbar`]: Formatting toolbar layout and hit-testing

pub mod layout;
pub mod style;
pub mod toolbar;

mod overlays;
mod render;
mod status;

pub use layout::{Areas, VisualLine, areas, cursor_position, layout_document, point_at};
pub use overlays::help_lines;
pub use render::{PLACEHOLDER, render};
pub use toolbar::{ToolbarItem, button_at, toolbar_items};
