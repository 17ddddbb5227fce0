use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::editor::Editor;
use crate::shell::{DEFAULT_ROUTE, Page, PageMeta};
use crate::ui::{self, VisualLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone)]
pub struct Model {
    /// The editor controller and its current value
    pub editor: Editor,
    /// The mounted page
    pub page: Page,
    /// Route the page was resolved from
    pub route: String,
    /// Static metadata of the mounted page
    pub meta: PageMeta,
    /// Terminal size (width, height)
    pub terminal_size: (u16, u16),
    /// First visual line shown in the page
    pub scroll_offset: usize,
    /// Document file loaded at startup, if not the built-in one
    pub document_path: Option<PathBuf>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Scroll offset inside the help overlay
    pub help_scroll_offset: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl Model {
    /// Create a model mounting `page` with the given editor.
    pub fn new(
        editor: Editor,
        page: Page,
        route: impl Into<String>,
        terminal_size: (u16, u16),
    ) -> Self {
        Self {
            editor,
            page,
            route: route.into(),
            meta: page.meta(),
            terminal_size,
            scroll_offset: 0,
            document_path: None,
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            help_scroll_offset: 0,
            should_quit: false,
            toast: None,
        }
    }

    /// The area inside the page where document text is drawn.
    pub fn text_area(&self) -> Rect {
        let (width, height) = self.terminal_size;
        ui::areas(Rect::new(0, 0, width, height)).text
    }

    pub fn visual_lines(&self) -> Vec<VisualLine> {
        ui::layout_document(self.editor.value().document(), self.text_area().width)
    }

    pub fn max_scroll(&self) -> usize {
        self.visual_lines()
            .len()
            .saturating_sub(usize::from(self.text_area().height))
    }

    /// Scroll just enough for the cursor row to be on screen.
    pub fn ensure_cursor_visible(&mut self) {
        let height = usize::from(self.text_area().height);
        let lines = self.visual_lines();
        let value = self.editor.value();
        let Some((row, _)) =
            ui::cursor_position(&lines, value.document(), value.selection().focus())
        else {
            return;
        };
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if height > 0 && row >= self.scroll_offset + height {
            self.scroll_offset = row + 1 - height;
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(Editor::default(), Page::default(), DEFAULT_ROUTE, (80, 24))
    }
}
