//! Message types for the single-line editing engine.

/// Everything the input side can ask a session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMsg {
    // === Insertion ===
    /// Insert a single typed character
    InsertChar(char),
    /// Insert a string typed in one go (e.g. IME commit)
    InsertText(String),
    /// Insert clipboard text, line breaks folded to spaces
    Paste(String),

    // === Deletion ===
    /// Delete character before cursor (Backspace)
    DeleteBackward,
    /// Delete character after cursor (Delete)
    DeleteForward,

    // === Indentation ===
    /// Insert one indent unit at the selection
    Indent,
    /// Remove one indent unit from the start of the line
    Unindent,

    // === Undo/Redo ===
    Undo,
    Redo,

    // === Surface ===
    /// Flip spellchecking on the surface
    ToggleSpellCheck,

    // === Finalization ===
    /// Accept the edit (Enter)
    Commit,
    /// Abandon the edit (Escape)
    Cancel,
}

impl EditMsg {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            EditMsg::InsertChar(_) => "InsertChar",
            EditMsg::InsertText(_) => "InsertText",
            EditMsg::Paste(_) => "Paste",
            EditMsg::DeleteBackward => "DeleteBackward",
            EditMsg::DeleteForward => "DeleteForward",
            EditMsg::Indent => "Indent",
            EditMsg::Unindent => "Unindent",
            EditMsg::Undo => "Undo",
            EditMsg::Redo => "Redo",
            EditMsg::ToggleSpellCheck => "ToggleSpellCheck",
            EditMsg::Commit => "Commit",
            EditMsg::Cancel => "Cancel",
        }
    }
}
