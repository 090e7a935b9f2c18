//! Replayable editing scripts
//!
//! A script is an initial line of text plus a list of steps. Steps are fed
//! through the keymap into an [`EditingSession`] over a headless
//! [`StringSurface`], with time advanced by a [`ManualClock`], so a replay is
//! deterministic.
//!
//! ```yaml
//! text: "hello"
//! selection: { start: 0, end: 0 }
//! steps:
//!   - key: tab
//!   - type: "world "
//!   - wait: 300
//!   - paste: "a\nb"
//!   - key: ctrl+z
//!   - key: enter
//! ```
//!
//! The same steps can be written inline as `"world <tab><wait:300><ctrl+z><enter>"`:
//! plain characters are typed, `<...>` holds a key chord or `wait:MS`, and
//! `<lt>` types a literal `<`.

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::editable::{
    EditMsg, EditingSession, Finalization, ManualClock, Selection, SessionOptions, Snapshot,
    StringSurface, TextSurface,
};
use crate::keymap::{parse_key_string, KeymapError, Keymap};
use crate::util::char_len;

/// One scripted input event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Type each character as its own keystroke
    Type(String),
    /// Press a key chord such as `ctrl+shift+z`
    Key(String),
    /// Paste clipboard text
    Paste(String),
    /// Move the selection from the host side
    Select(Selection),
    /// Let time pass, in milliseconds
    Wait(u64),
}

/// Initial state plus the steps to replay
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub text: String,
    /// Initial selection (defaults to a caret at the end of `text`)
    #[serde(default)]
    pub selection: Option<Selection>,
    #[serde(
        default,
        deserialize_with = "serde_yaml::with::singleton_map_recursive::deserialize"
    )]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a YAML script
    pub fn from_yaml(yaml: &str) -> Result<Self, ScriptError> {
        serde_yaml::from_str(yaml).map_err(|e| ScriptError::Parse(e.to_string()))
    }

    /// Load a YAML script from disk
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScriptError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Build a script from initial text and an inline key sequence
    pub fn from_keys(text: impl Into<String>, keys: &str) -> Result<Self, ScriptError> {
        Ok(Self {
            text: text.into(),
            selection: None,
            steps: parse_keys(keys)?,
        })
    }
}

/// Parse the inline key syntax into steps
pub fn parse_keys(keys: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    let mut typed = String::new();
    let mut chars = keys.chars();

    while let Some(ch) = chars.next() {
        if ch != '<' {
            typed.push(ch);
            continue;
        }

        let mut chord = String::new();
        let closed = loop {
            match chars.next() {
                Some('>') => break true,
                Some(c) => chord.push(c),
                None => break false,
            }
        };
        if !closed {
            return Err(ScriptError::Keys(format!("unclosed '<{}'", chord)));
        }

        if chord == "lt" {
            typed.push('<');
            continue;
        }
        if !typed.is_empty() {
            steps.push(Step::Type(std::mem::take(&mut typed)));
        }
        steps.push(parse_chord(&chord)?);
    }

    if !typed.is_empty() {
        steps.push(Step::Type(typed));
    }
    Ok(steps)
}

fn parse_chord(chord: &str) -> Result<Step, ScriptError> {
    if let Some(ms) = chord.strip_prefix("wait:") {
        let ms = ms
            .trim()
            .parse()
            .map_err(|_| ScriptError::Keys(format!("invalid wait '{}'", ms)))?;
        return Ok(Step::Wait(ms));
    }
    if chord.trim().is_empty() {
        return Err(ScriptError::Keys("empty '<>'".to_string()));
    }
    Ok(Step::Key(chord.to_string()))
}

/// What a replay produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptOutcome {
    /// Set if the script ended the session with Enter or Escape
    pub finalization: Option<Finalization>,
    /// Final content (the finalized value, or the live text if still active)
    pub content: String,
    /// Live selection, if the session is still active
    pub selection: Option<Selection>,
    /// Undo stack, oldest first
    pub history: Vec<Snapshot>,
    pub redo_count: usize,
}

impl ScriptOutcome {
    pub fn is_cancelled(&self) -> bool {
        self.finalization.as_ref().is_some_and(|f| f.is_cancel())
    }
}

/// Replay `script` against a fresh session
pub fn run(
    script: &Script,
    options: SessionOptions,
    keymap: &Keymap,
) -> Result<ScriptOutcome, ScriptError> {
    let clock = ManualClock::new();
    let mut session = EditingSession::with_clock(options, clock.clone());

    let selection = script
        .selection
        .map(|s| s.resolve(char_len(&script.text)))
        .unwrap_or_else(|| Selection::collapsed(char_len(&script.text)));
    let finalized: Rc<RefCell<Option<Finalization>>> = Rc::default();
    let sink = finalized.clone();
    session.attach(
        StringSurface::with_selection(&script.text, selection),
        move |f| *sink.borrow_mut() = Some(f),
    );

    for (idx, step) in script.steps.iter().enumerate() {
        if !session.is_active() {
            tracing::debug!(
                "Session finalized, skipping {} remaining steps",
                script.steps.len() - idx
            );
            break;
        }

        match step {
            Step::Type(text) => {
                for ch in text.chars() {
                    session.handle(EditMsg::InsertChar(ch));
                    session.tick();
                }
            }
            Step::Key(key) => {
                let stroke =
                    parse_key_string(key).map_err(|source| ScriptError::Key { step: idx, source })?;
                match keymap.handle_keystroke(stroke).to_msg() {
                    Some(msg) => {
                        session.handle(msg);
                    }
                    None => tracing::debug!("Step {}: no binding for {}", idx, stroke),
                }
            }
            Step::Paste(text) => {
                session.paste(text);
            }
            Step::Select(selection) => {
                session.select(*selection);
            }
            Step::Wait(ms) => clock.advance(Duration::from_millis(*ms)),
        }
        session.tick();
    }

    let finalization = finalized.borrow_mut().take();
    let content = match &finalization {
        Some(f) => f.content.clone(),
        None => session.content().unwrap_or_default(),
    };

    Ok(ScriptOutcome {
        content,
        selection: session.surface().map(|s| s.selection()),
        history: session.history().snapshots().cloned().collect(),
        redo_count: session.history().redo_count(),
        finalization,
    })
}

/// Errors from loading or replaying a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    Io(String),
    Parse(String),
    /// Malformed inline key sequence
    Keys(String),
    /// A `key` step names a key that cannot be parsed
    Key { step: usize, source: KeymapError },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(e) => write!(f, "IO error: {}", e),
            ScriptError::Parse(e) => write!(f, "Parse error: {}", e),
            ScriptError::Keys(e) => write!(f, "Invalid key sequence: {}", e),
            ScriptError::Key { step, source } => write!(f, "Step {}: {}", step, source),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Key { source, .. } => Some(source),
            _ => None,
        }
    }
}
