//! Command-line argument parsing for the oneline binary
//!
//! Supports:
//! - Replaying a YAML script or an inline key sequence
//! - Overriding the initial text
//! - Per-run overrides of the editor config

use std::path::PathBuf;

use clap::Parser;

use crate::config::EditorConfig;
use crate::editable::SessionOptions;
use crate::script::{Script, ScriptError};

/// Replay keystrokes against a single-line editor and print the result
#[derive(Parser, Debug, Default)]
#[command(
    name = "oneline",
    version,
    about = "Replay keystrokes against a single-line editor"
)]
pub struct CliArgs {
    /// Initial text (overrides the script's `text`)
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// YAML script to replay
    #[arg(short, long, value_name = "FILE", conflicts_with = "keys")]
    pub script: Option<PathBuf>,

    /// Inline key sequence, e.g. "abc<tab><ctrl+z><enter>"
    #[arg(short, long, value_name = "KEYS")]
    pub keys: Option<String>,

    /// Config file (defaults to ~/.config/oneline/config.yaml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Indent unit inserted by Tab
    #[arg(long, value_name = "UNIT")]
    pub indent: Option<String>,

    /// Undo history capacity
    #[arg(long, value_name = "N")]
    pub max_history: Option<usize>,

    /// Print the full outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the effective config (overrides applied) back to the config file
    #[arg(long)]
    pub save_config: bool,
}

impl CliArgs {
    /// Load the editor config named on the command line, or the user's default
    pub fn load_config(&self) -> EditorConfig {
        match &self.config {
            Some(path) => EditorConfig::load_from(path),
            None => EditorConfig::load(),
        }
    }

    /// `config` with command-line overrides applied
    pub fn effective_config(&self, config: &EditorConfig) -> EditorConfig {
        let mut config = config.clone();
        if let Some(unit) = &self.indent {
            config.indent_unit = unit.clone();
        }
        if let Some(max_history) = self.max_history {
            config.max_history = max_history;
        }
        config
    }

    /// Session options from `config` with command-line overrides applied
    pub fn session_options(&self, config: &EditorConfig) -> SessionOptions {
        self.effective_config(config).session_options()
    }

    /// Persist the effective config to `--config`, or the user's default file
    pub fn save_config(&self, config: &EditorConfig) -> Result<(), String> {
        let config = self.effective_config(config);
        match &self.config {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
    }

    /// Build the script to replay
    pub fn script(&self) -> Result<Script, ScriptError> {
        let mut script = match (&self.script, &self.keys) {
            (Some(path), _) => Script::load(path)?,
            (None, Some(keys)) => Script::from_keys(String::new(), keys)?,
            (None, None) => Script::default(),
        };
        if let Some(text) = &self.text {
            script.text = text.clone();
            script.selection = None;
        }
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::CancelPolicy;
    use crate::script::Step;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "oneline",
            "--text",
            "abc",
            "--keys",
            "<tab>",
            "--indent",
            "\t",
            "--max-history",
            "5",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.text.as_deref(), Some("abc"));
        assert_eq!(args.keys.as_deref(), Some("<tab>"));
        assert_eq!(args.max_history, Some(5));
        assert!(args.json);
    }

    #[test]
    fn test_script_and_keys_conflict() {
        let result = CliArgs::try_parse_from(["oneline", "--script", "s.yaml", "--keys", "a"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let args = CliArgs {
            indent: Some("\t".to_string()),
            max_history: Some(3),
            ..Default::default()
        };
        let config = EditorConfig {
            cancel_policy: CancelPolicy::RevertToOriginal,
            ..Default::default()
        };

        let options = args.session_options(&config);
        assert_eq!(options.indent_unit, "\t");
        assert_eq!(options.max_history, 3);
        assert_eq!(options.cancel_policy, CancelPolicy::RevertToOriginal);
    }

    #[test]
    fn test_save_config_writes_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let args = CliArgs {
            config: Some(path.clone()),
            indent: Some("\t".to_string()),
            save_config: true,
            ..Default::default()
        };

        let config = args.load_config();
        args.save_config(&config).unwrap();

        let saved = EditorConfig::load_from(&path);
        assert_eq!(saved.indent_unit, "\t");
        assert_eq!(saved.max_history, EditorConfig::default().max_history);
    }

    #[test]
    fn test_parse_save_config_flag() {
        let args = CliArgs::try_parse_from(["oneline", "--save-config"]).unwrap();
        assert!(args.save_config);
        assert!(!CliArgs::default().save_config);
    }

    #[test]
    fn test_text_without_steps() {
        let args = CliArgs {
            text: Some("hello".to_string()),
            ..Default::default()
        };
        let script = args.script().unwrap();
        assert_eq!(script.text, "hello");
        assert!(script.steps.is_empty());
    }

    #[test]
    fn test_inline_keys() {
        let args = CliArgs {
            keys: Some("a<enter>".to_string()),
            ..Default::default()
        };
        let script = args.script().unwrap();
        assert_eq!(
            script.steps,
            vec![Step::Type("a".into()), Step::Key("enter".into())]
        );
    }

    #[test]
    fn test_text_overrides_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.yaml");
        std::fs::write(
            &path,
            "text: original\nselection: { start: 0, end: 0 }\nsteps:\n  - key: tab\n",
        )
        .unwrap();

        let args = CliArgs {
            script: Some(path),
            text: Some("override".to_string()),
            ..Default::default()
        };
        let script = args.script().unwrap();
        assert_eq!(script.text, "override");
        assert_eq!(script.selection, None);
        assert_eq!(script.steps.len(), 1);
    }

    #[test]
    fn test_missing_script_file() {
        let args = CliArgs {
            script: Some(PathBuf::from("/nonexistent/script.yaml")),
            ..Default::default()
        };
        assert!(matches!(args.script(), Err(ScriptError::Io(_))));
    }
}
