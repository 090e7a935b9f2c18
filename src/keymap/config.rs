//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = get_current_platform();
    let mut bindings = Vec::with_capacity(config.bindings.len());

    for entry in config.bindings {
        // Skip if platform-specific and doesn't match current platform
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        let keystroke = parse_key_string(&entry.key)?;
        let command = parse_command(&entry.command)?;
        bindings.push(Keybinding::new(keystroke, command));
    }

    Ok(bindings)
}

/// Parse a key string like "ctrl+shift+z" into a Keystroke.
///
/// Modifiers come first, joined with `+`, and the last part names the key.
/// The plus key itself is written `+`, or `ctrl++` with modifiers.
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let spec = key_str.trim();
    let (modifier_part, key_name) = if spec == "+" {
        ("", "+")
    } else if let Some(prefix) = spec.strip_suffix("++") {
        (prefix, "+")
    } else {
        spec.rsplit_once('+').unwrap_or(("", spec))
    };

    let mut mods = Modifiers::NONE;
    for part in modifier_part.split('+').filter(|p| !p.trim().is_empty()) {
        match parse_modifier(&part.trim().to_lowercase()) {
            Some(modifier) => mods = mods | modifier,
            None => {
                return Err(KeymapError::InvalidKey(format!(
                    "Multiple keys in binding: {}",
                    key_str
                )))
            }
        }
    }

    let key_name = key_name.trim().to_lowercase();
    if parse_modifier(&key_name).is_some() {
        return Err(KeymapError::InvalidKey(format!(
            "No key found in binding: {}",
            key_str
        )));
    }

    Ok(Keystroke::new(parse_key_code(&key_name)?, mods))
}

fn parse_modifier(name: &str) -> Option<Modifiers> {
    match name {
        "cmd" => Some(Modifiers::cmd()),
        "ctrl" | "control" => Some(Modifiers::CTRL),
        "shift" => Some(Modifiers::SHIFT),
        "alt" | "option" | "opt" => Some(Modifiers::ALT),
        "meta" | "super" | "win" => Some(Modifiers::META),
        _ => None,
    }
}

/// A single character, or one of the named keys a line editor reacts to
fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),
        "plus" => Ok(KeyCode::Char('+')),
        "" => Err(KeymapError::InvalidKey("Empty key name".to_string())),
        _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

/// Parse a command name string into a Command enum
fn parse_command(cmd: &str) -> Result<Command, KeymapError> {
    Command::from_str(cmd).map_err(|_| KeymapError::InvalidCommand(cmd.to_string()))
}

/// Get the current platform identifier
fn get_current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// Why a keymap file, or a single key string, was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    /// The keymap file could not be read
    IoError(String),
    /// The file is not a valid `bindings:` document
    ParseError(String),
    /// A `key:` entry does not name a keystroke
    InvalidKey(String),
    /// A `command:` entry names no known command
    InvalidCommand(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "Cannot read keymap: {}", e),
            KeymapError::ParseError(e) => write!(f, "Malformed keymap: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Unknown command: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}
