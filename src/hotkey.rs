//! Keyboard chords with a platform-aware "mod" modifier.

use std::fmt;

use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which physical modifier acts as "mod".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModKey {
    /// Cmd (Super) on macOS, Ctrl elsewhere.
    #[default]
    Auto,
    Ctrl,
    Super,
}

impl ModKey {
    /// Resolve [`ModKey::Auto`] for the current platform.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Auto if cfg!(target_os = "macos") => Self::Super,
            Self::Auto => Self::Ctrl,
            other => other,
        }
    }

    pub const fn modifiers(self) -> KeyModifiers {
        match self.resolve() {
            Self::Super => KeyModifiers::SUPER,
            _ => KeyModifiers::CONTROL,
        }
    }

    /// Display name of the modifier key.
    pub const fn label(self) -> &'static str {
        match self.resolve() {
            Self::Super => "Cmd",
            _ => "Ctrl",
        }
    }

    /// Name used in config files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Ctrl => "ctrl",
            Self::Super => "super",
        }
    }
}

impl fmt::Display for ModKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key plus optional "mod" and Shift.
///
/// ```
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
/// use urupemba::hotkey::{Hotkey, ModKey};
///
/// const BOLD: Hotkey = Hotkey::key(KeyCode::Char('b')).with_mod();
/// let event = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::CONTROL);
/// assert!(BOLD.matches(&event, ModKey::Ctrl));
/// assert!(!BOLD.matches(&event, ModKey::Super));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    code: KeyCode,
    with_mod: bool,
    shift: bool,
}

impl Hotkey {
    pub const fn key(code: KeyCode) -> Self {
        Self {
            code,
            with_mod: false,
            shift: false,
        }
    }

    #[must_use]
    pub const fn with_mod(mut self) -> Self {
        self.with_mod = true;
        self
    }

    #[must_use]
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Whether `event` is exactly this chord.
    ///
    /// Letters compare case-insensitively; an uppercase letter counts as
    /// Shift being held, since terminals report Shift either way.
    pub fn matches(&self, event: &KeyEvent, mod_key: ModKey) -> bool {
        let (code, uppercase) = match event.code {
            KeyCode::Char(c) => (KeyCode::Char(c.to_ascii_lowercase()), c.is_ascii_uppercase()),
            other => (other, false),
        };
        let expected_code = match self.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        if code != expected_code {
            return false;
        }
        let shift = uppercase || event.modifiers.contains(KeyModifiers::SHIFT);
        if shift != self.shift {
            return false;
        }
        let held = event.modifiers.difference(KeyModifiers::SHIFT);
        let wanted = if self.with_mod {
            mod_key.modifiers()
        } else {
            KeyModifiers::NONE
        };
        held == wanted
    }

    /// Human-readable chord, e.g. `Ctrl+Shift+Z`.
    pub fn label(&self, mod_key: ModKey) -> String {
        let mut parts = Vec::with_capacity(3);
        if self.with_mod {
            parts.push(mod_key.label().to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            other => other.to_string(),
        });
        parts.join("+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNDO: Hotkey = Hotkey::key(KeyCode::Char('z')).with_mod();
    const REDO: Hotkey = Hotkey::key(KeyCode::Char('z')).with_mod().with_shift();

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_auto_resolves_per_platform() {
        let resolved = ModKey::Auto.resolve();
        if cfg!(target_os = "macos") {
            assert_eq!(resolved, ModKey::Super);
        } else {
            assert_eq!(resolved, ModKey::Ctrl);
        }
        assert_eq!(ModKey::Ctrl.resolve(), ModKey::Ctrl);
    }

    #[test]
    fn test_matches_requires_exact_modifiers() {
        assert!(UNDO.matches(&key(KeyCode::Char('z'), KeyModifiers::CONTROL), ModKey::Ctrl));
        assert!(!UNDO.matches(&key(KeyCode::Char('z'), KeyModifiers::NONE), ModKey::Ctrl));
        assert!(!UNDO.matches(
            &key(KeyCode::Char('z'), KeyModifiers::CONTROL | KeyModifiers::ALT),
            ModKey::Ctrl
        ));
    }

    #[test]
    fn test_shift_distinguishes_undo_from_redo() {
        let shifted = key(
            KeyCode::Char('z'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert!(REDO.matches(&shifted, ModKey::Ctrl));
        assert!(!UNDO.matches(&shifted, ModKey::Ctrl));
    }

    #[test]
    fn test_uppercase_char_counts_as_shift() {
        let upper = key(KeyCode::Char('Z'), KeyModifiers::CONTROL);
        assert!(REDO.matches(&upper, ModKey::Ctrl));
        assert!(!UNDO.matches(&upper, ModKey::Ctrl));
    }

    #[test]
    fn test_super_mod() {
        let cmd = key(KeyCode::Char('z'), KeyModifiers::SUPER);
        assert!(UNDO.matches(&cmd, ModKey::Super));
        assert!(!UNDO.matches(&cmd, ModKey::Ctrl));
    }

    #[test]
    fn test_labels() {
        assert_eq!(REDO.label(ModKey::Ctrl), "Ctrl+Shift+Z");
        assert_eq!(UNDO.label(ModKey::Super), "Cmd+Z");
        assert_eq!(
            Hotkey::key(KeyCode::Char('`')).with_mod().label(ModKey::Ctrl),
            "Ctrl+`"
        );
    }

    #[test]
    fn test_mod_key_parses_from_cli_names() {
        assert_eq!(ModKey::from_str("super", true).unwrap(), ModKey::Super);
        assert_eq!(ModKey::from_str("CTRL", true).unwrap(), ModKey::Ctrl);
        assert!(ModKey::from_str("hyper", true).is_err());
    }
}
