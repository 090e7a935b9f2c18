//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/oneline/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::editable::{
    CancelPolicy, SessionOptions, DEFAULT_DEBOUNCE, DEFAULT_INDENT_UNIT, DEFAULT_MAX_HISTORY,
};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Undo stack capacity
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Text inserted by Tab and removed by Shift+Tab
    #[serde(default = "default_indent_unit")]
    pub indent_unit: String,

    /// Quiet period in milliseconds before typing becomes an undo step
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// What Escape resolves with
    #[serde(default)]
    pub cancel_policy: CancelPolicy,

    /// Spellcheck state forced on attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellcheck: Option<bool>,
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

fn default_indent_unit() -> String {
    DEFAULT_INDENT_UNIT.to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            indent_unit: default_indent_unit(),
            debounce_ms: default_debounce_ms(),
            cancel_policy: CancelPolicy::default(),
            spellcheck: None,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults if it is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        self.save_to(&path)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Build the options a new editing session starts with
    pub fn session_options(&self) -> SessionOptions {
        let mut options = SessionOptions::default()
            .with_max_history(self.max_history)
            .with_indent_unit(self.indent_unit.clone())
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_cancel_policy(self.cancel_policy);
        options.spellcheck = self.spellcheck;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.max_history, 100);
        assert_eq!(config.indent_unit, "    ");
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.cancel_policy, CancelPolicy::KeepCurrent);
        assert_eq!(config.spellcheck, None);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: EditorConfig = serde_yaml::from_str("indent_unit: \"\\t\"\n").unwrap();
        assert_eq!(config.indent_unit, "\t");
        assert_eq!(config.max_history, 100);
        assert_eq!(config.debounce_ms, 300);
    }

    #[test]
    fn test_cancel_policy_yaml() {
        let config: EditorConfig =
            serde_yaml::from_str("cancel_policy: revert_to_original\n").unwrap();
        assert_eq!(config.cancel_policy, CancelPolicy::RevertToOriginal);
    }

    #[test]
    fn test_session_options() {
        let config = EditorConfig {
            max_history: 5,
            indent_unit: "  ".to_string(),
            debounce_ms: 50,
            cancel_policy: CancelPolicy::RevertToOriginal,
            spellcheck: Some(false),
        };
        let options = config.session_options();
        assert_eq!(options.max_history, 5);
        assert_eq!(options.indent_unit, "  ");
        assert_eq!(options.debounce, Duration::from_millis(50));
        assert_eq!(options.cancel_policy, CancelPolicy::RevertToOriginal);
        assert_eq!(options.spellcheck, Some(false));
    }
}
