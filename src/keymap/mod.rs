//! Configurable keyboard mapping system
//!
//! This module provides a data-driven keybinding system that:
//! - Maps keystrokes to editing commands
//! - Falls back to character insertion for unbound printable keys
//! - Enables user customization via YAML config files
//!
//! # Architecture
//!
//! ```text
//! Keystroke → Keymap::handle_keystroke() → KeyAction → EditMsg
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Hardcoded defaults
//! let keymap = Keymap::with_bindings(default_bindings());
//!
//! // Embedded keymap.yaml merged with ~/.config/oneline/keymap.yaml
//! let keymap = Keymap::with_bindings(load_default_keymap());
//! ```

mod binding;
mod command;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, merge_bindings,
    merge_user_keymap,
};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};
