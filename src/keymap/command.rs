//! Command enum representing every action a key can trigger
//!
//! Commands are the bridge between keybindings and the session's message
//! type. Each command maps to at most one `EditMsg`.

use std::fmt;
use std::str::FromStr;

use crate::editable::EditMsg;

/// All editing commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Text Editing
    // ========================================================================
    /// Delete the character before the caret
    DeleteBackward,
    /// Delete the character after the caret
    DeleteForward,
    /// Insert one indent unit
    Indent,
    /// Remove one indent unit from the start of the line
    Unindent,

    // ========================================================================
    // Undo/Redo
    // ========================================================================
    Undo,
    Redo,

    // ========================================================================
    // Surface
    // ========================================================================
    /// Toggle spellchecking
    ToggleSpellCheck,

    // ========================================================================
    // Session
    // ========================================================================
    /// Accept the edit
    Commit,
    /// Abandon the edit
    Cancel,

    // ========================================================================
    // Special
    // ========================================================================
    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    /// Every bindable command, in display order
    pub const ALL: &'static [Command] = &[
        Command::DeleteBackward,
        Command::DeleteForward,
        Command::Indent,
        Command::Unindent,
        Command::Undo,
        Command::Redo,
        Command::ToggleSpellCheck,
        Command::Commit,
        Command::Cancel,
    ];

    /// Convert to the session message this command triggers
    pub fn to_msg(self) -> Option<EditMsg> {
        let msg = match self {
            Command::DeleteBackward => EditMsg::DeleteBackward,
            Command::DeleteForward => EditMsg::DeleteForward,
            Command::Indent => EditMsg::Indent,
            Command::Unindent => EditMsg::Unindent,
            Command::Undo => EditMsg::Undo,
            Command::Redo => EditMsg::Redo,
            Command::ToggleSpellCheck => EditMsg::ToggleSpellCheck,
            Command::Commit => EditMsg::Commit,
            Command::Cancel => EditMsg::Cancel,
            Command::Unbound => return None,
        };
        Some(msg)
    }

    /// Name used in keymap YAML files
    pub fn name(self) -> &'static str {
        match self {
            Command::DeleteBackward => "DeleteBackward",
            Command::DeleteForward => "DeleteForward",
            Command::Indent => "Indent",
            Command::Unindent => "Unindent",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::ToggleSpellCheck => "ToggleSpellCheck",
            Command::Commit => "Commit",
            Command::Cancel => "Cancel",
            Command::Unbound => "Unbound",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DeleteBackward" => Ok(Command::DeleteBackward),
            "DeleteForward" => Ok(Command::DeleteForward),
            "Indent" | "IndentLines" => Ok(Command::Indent),
            "Unindent" | "UnindentLines" => Ok(Command::Unindent),
            "Undo" => Ok(Command::Undo),
            "Redo" => Ok(Command::Redo),
            "ToggleSpellCheck" => Ok(Command::ToggleSpellCheck),
            "Commit" => Ok(Command::Commit),
            "Cancel" => Ok(Command::Cancel),
            "Unbound" => Ok(Command::Unbound),
            _ => Err(()),
        }
    }
}
