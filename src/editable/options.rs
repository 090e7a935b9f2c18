//! Per-session editing options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::debounce::DEFAULT_DEBOUNCE;
use super::history::DEFAULT_MAX_HISTORY;
use super::transform::DEFAULT_INDENT_UNIT;

/// What Escape resolves with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Resolve with whatever is on the surface, same as commit
    #[default]
    KeepCurrent,
    /// Resolve with the content captured when the session attached
    RevertToOriginal,
}

/// Options that shape one editing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Undo stack capacity (clamped to at least 1)
    pub max_history: usize,

    /// Literal string inserted by indent and removed by unindent
    pub indent_unit: String,

    /// Quiet period before typing is committed to history
    pub debounce: Duration,

    /// Resolution used by cancel
    pub cancel_policy: CancelPolicy,

    /// Spellcheck state applied to the surface on attach (None = leave as is)
    pub spellcheck: Option<bool>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            cancel_policy: CancelPolicy::default(),
            spellcheck: None,
        }
    }
}

impl SessionOptions {
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }
}
