// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorKey)
    clippy::module_name_repetitions
)]

//! # Urupemba
//!
//! A terminal rich-text editor with a formatting toolbar.
//!
//! Urupemba edits a tree of blocks (paragraphs, headings, quotes, lists)
//! holding marked-up text:
//! - Bold, italic, underline and code marks via hotkeys or toolbar
//! - Block type toggling, including nested bulleted and numbered lists
//! - Undo and redo over immutable document values
//! - Mouse placement and drag selection
//!
//! ## Architecture
//!
//! Urupemba uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Immutable document values, changes and history
//! - [`editor`]: Hotkeys, toolbar state and block toggling
//! - [`hotkey`]: Key chord matching against the platform "mod" key
//! - [`shell`]: Routes and page metadata
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod hotkey;
pub mod shell;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Change, Document, Selection, Value};
    pub use crate::editor::Editor;
}
