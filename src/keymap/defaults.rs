//! Default keybindings for the editor
//!
//! The embedded keymap.yaml is the base layer; a user keymap under the config
//! directory is merged on top of it.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap as YAML text
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. User config at ~/.config/oneline/keymap.yaml
///
/// User bindings with `command: Unbound` will remove matching default bindings.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let bindings = embedded_bindings();

    match crate::config_paths::keymap_file() {
        Some(user_path) if user_path.exists() => merge_user_keymap(bindings, &user_path),
        _ => bindings,
    }
}

/// Merge the keymap at `path` over `base`, keeping `base` if it fails to load
pub fn merge_user_keymap(base: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    match load_keymap_file(path) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                path.display(),
                user_bindings.len()
            );
            merge_bindings(base, user_bindings)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            base
        }
    }
}

fn embedded_bindings() -> Vec<Keybinding> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    }
}

/// Merge user bindings into base bindings
///
/// - If user binding has the same keystroke → replaces base
/// - If user binding command is `Unbound` → removes matching base bindings
/// - Otherwise → user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        match result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded default keybindings, mirroring the embedded keymap.yaml
pub fn default_bindings() -> Vec<Keybinding> {
    let none = Modifiers::NONE;
    let ctrl = Modifiers::CTRL;
    let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;

    vec![
        bind(KeyCode::Enter, none, Command::Commit),
        bind(KeyCode::Escape, none, Command::Cancel),
        bind(KeyCode::Tab, none, Command::Indent),
        bind(KeyCode::Tab, Modifiers::SHIFT, Command::Unindent),
        bind(KeyCode::Char('z'), ctrl, Command::Undo),
        bind(KeyCode::Char('y'), ctrl, Command::Redo),
        bind(KeyCode::Char('z'), ctrl_shift, Command::Redo),
        bind(KeyCode::Char('m'), ctrl, Command::ToggleSpellCheck),
        bind(KeyCode::Backspace, none, Command::DeleteBackward),
        bind(KeyCode::Delete, none, Command::DeleteForward),
    ]
}

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl_z() -> Keystroke {
        Keystroke::new(KeyCode::Char('z'), Modifiers::CTRL)
    }

    fn ctrl_u() -> Keystroke {
        Keystroke::new(KeyCode::Char('u'), Modifiers::CTRL)
    }

    #[test]
    fn test_default_bindings_not_empty() {
        assert_eq!(default_bindings().len(), 10);
    }

    #[test]
    fn test_hardcoded_defaults_match_embedded_yaml() {
        let embedded = parse_keymap_yaml(DEFAULT_KEYMAP_YAML).unwrap();
        assert_eq!(embedded, default_bindings());
    }

    #[test]
    fn test_merge_empty_user_returns_base() {
        let base = default_bindings();
        let merged = merge_bindings(base.clone(), vec![]);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_adds_new_binding() {
        let merged = merge_bindings(
            default_bindings(),
            vec![Keybinding::new(ctrl_u(), Command::Unindent)],
        );
        assert_eq!(merged.len(), default_bindings().len() + 1);
        assert!(merged.iter().any(|b| b.keystroke == ctrl_u()));
    }

    #[test]
    fn test_merge_overrides_existing() {
        let merged = merge_bindings(
            default_bindings(),
            vec![Keybinding::new(ctrl_z(), Command::Cancel)],
        );
        assert_eq!(merged.len(), default_bindings().len());
        let binding = merged.iter().find(|b| b.keystroke == ctrl_z()).unwrap();
        assert_eq!(binding.command, Command::Cancel);
    }

    #[test]
    fn test_merge_unbound_removes_binding() {
        let merged = merge_bindings(
            default_bindings(),
            vec![Keybinding::new(ctrl_z(), Command::Unbound)],
        );
        assert!(!merged.iter().any(|b| b.keystroke == ctrl_z()));
        assert_eq!(merged.len(), default_bindings().len() - 1);
    }

    #[test]
    fn test_merge_unbound_on_nonexistent_is_noop() {
        let merged = merge_bindings(
            default_bindings(),
            vec![Keybinding::new(ctrl_u(), Command::Unbound)],
        );
        assert_eq!(merged, default_bindings());
    }
}
