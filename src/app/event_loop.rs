use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{SetTitle, supports_keyboard_enhancement};
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::Editor;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the route does not resolve, the document fails to
    /// load, or terminal setup or the event loop hits an I/O failure.
    pub fn run(&self) -> Result<()> {
        let page = crate::shell::resolve(&self.route)
            .with_context(|| format!("Cannot mount route '{}'", self.route))?;
        // Load before entering raw mode so errors print normally
        let value = self.initial_value()?;
        tracing::info!(
            route = %self.route,
            leaves = value.document().leaf_count(),
            "mounting page"
        );

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal, urupemba requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(
            Editor::new(value, self.mod_key),
            page,
            self.route.clone(),
            (size.width, size.height),
        );
        model.document_path.clone_from(&self.document_path);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        let _ = execute!(stdout(), SetTitle(model.meta.title));
        let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keys {
            let _ = execute!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
                )
            );
        }

        // Main loop
        let result = Self::event_loop(&mut terminal, &mut model, self.mouse_enabled);

        // Restore terminal
        if enhanced_keys {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        mouse_enabled: bool,
    ) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        if mouse_enabled {
            execute!(stdout(), EnableMouseCapture)?;
            set_mouse_drag_tracking(true)?;
        }

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                tracing::debug!(width, height, "resize applied");
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so the debouncer uses accurate times.
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if let Some(msg) =
                    Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer)
                {
                    tracing::trace!(?msg, "message");
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if let Some(msg) =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer)
                    {
                        drained += 1;
                        *model = update(std::mem::take(model), msg);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    tracing::trace!(drained, "event burst drained");
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        if mouse_enabled {
            let _ = set_mouse_drag_tracking(false);
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        Ok(())
    }
}

fn set_mouse_drag_tracking(enable: bool) -> std::io::Result<()> {
    // Button-event tracking (1002) with SGR encoding (1006) reports drags.
    let mut out = stdout();
    if enable {
        out.write_all(b"\x1b[?1002h\x1b[?1006h")?;
    } else {
        out.write_all(b"\x1b[?1002l\x1b[?1006l")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::ResizeDebouncer;

    #[test]
    fn test_resize_debouncer_waits_for_delay() {
        let mut debouncer = ResizeDebouncer::new(100);
        debouncer.queue(120, 40, 1_000);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.take_ready(1_050), None);
        assert_eq!(debouncer.take_ready(1_100), Some((120, 40)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_resize_debouncer_keeps_latest_size() {
        let mut debouncer = ResizeDebouncer::new(100);
        debouncer.queue(100, 30, 0);
        debouncer.queue(90, 20, 50);
        assert_eq!(debouncer.take_ready(120), None);
        assert_eq!(debouncer.take_ready(150), Some((90, 20)));
    }
}
