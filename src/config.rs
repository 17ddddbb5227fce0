use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::hotkey::ModKey;

/// Settings persisted as flag tokens in config files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_mouse: bool,
    pub mod_key: Option<ModKey>,
    pub document: Option<PathBuf>,
    pub history_limit: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans are or-ed, options from `other`
    /// win when set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_mouse: self.no_mouse || other.no_mouse,
            mod_key: other.mod_key.or(self.mod_key),
            document: other.document.clone().or_else(|| self.document.clone()),
            history_limit: other.history_limit.or(self.history_limit),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("urupemba").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("urupemba")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("urupemba").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("urupemba")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".urupembarc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    let flags = parse_flag_tokens(&tokens);
    tracing::debug!(path = %path.display(), ?flags, "loaded config");
    Ok(flags)
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# urupemba defaults (saved with --save)".to_string()];
    if flags.no_mouse {
        lines.push("--no-mouse".to_string());
    }
    if let Some(mod_key) = flags.mod_key {
        lines.push(format!("--mod-key {mod_key}"));
    }
    if let Some(document) = &flags.document {
        lines.push(format!("--document {}", document.display()));
    }
    if let Some(limit) = flags.history_limit {
        lines.push(format!("--history-limit {limit}"));
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token list, skipping anything else.
///
/// Both `--flag value` and `--flag=value` are accepted. Values that do not
/// parse are ignored with a warning.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--no-mouse" {
            flags.no_mouse = true;
            i += 1;
            continue;
        }
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token, None),
        };
        if !matches!(
            name,
            "--mod-key" | "--document" | "--history-limit" | "--log-file"
        ) {
            i += 1;
            continue;
        }
        let value = match inline {
            Some(value) => Some(value),
            None => {
                i += 1;
                tokens.get(i).cloned()
            }
        };
        if let Some(value) = value {
            apply_flag(&mut flags, name, &value);
        }
        i += 1;
    }
    flags
}

fn apply_flag(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--mod-key" => match ModKey::from_str(value, true) {
            Ok(mod_key) => flags.mod_key = Some(mod_key),
            Err(_) => tracing::warn!(value, "ignoring unknown --mod-key"),
        },
        "--document" => flags.document = Some(PathBuf::from(value)),
        "--history-limit" => match value.parse() {
            Ok(limit) => flags.history_limit = Some(limit),
            Err(_) => tracing::warn!(value, "ignoring invalid --history-limit"),
        },
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}
