//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::document::{DEFAULT_HISTORY_LIMIT, INITIAL_VALUE_JSON, Value};
use crate::hotkey::ModKey;
use crate::shell::DEFAULT_ROUTE;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug, Clone)]
pub struct App {
    route: String,
    document_path: Option<PathBuf>,
    mod_key: ModKey,
    history_limit: usize,
    mouse_enabled: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an application mounted at the default route with the
    /// built-in document.
    pub fn new() -> Self {
        Self {
            route: DEFAULT_ROUTE.to_string(),
            document_path: None,
            mod_key: ModKey::Auto,
            history_limit: DEFAULT_HISTORY_LIMIT,
            mouse_enabled: true,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Mount the page at `route` instead of the default.
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    /// Load the initial document from a JSON file.
    pub fn with_document(mut self, path: Option<PathBuf>) -> Self {
        self.document_path = path;
        self
    }

    pub const fn with_mod_key(mut self, mod_key: ModKey) -> Self {
        self.mod_key = mod_key;
        self
    }

    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Enable or disable mouse capture.
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// Build the value the editor starts with.
    ///
    /// # Errors
    ///
    /// Returns an error if the document file cannot be read or is not a
    /// valid document.
    pub fn initial_value(&self) -> Result<Value> {
        let value = match &self.document_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read document {}", path.display()))?;
                Value::from_json(&json)
                    .with_context(|| format!("Invalid document {}", path.display()))?
            }
            None => Value::from_json(INITIAL_VALUE_JSON).context("Invalid built-in document")?,
        };
        Ok(value.with_history_limit(self.history_limit))
    }
}
