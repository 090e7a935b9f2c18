//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use crate::editable::EditMsg;

use super::binding::Keybinding;
use super::command::Command;
use super::types::Keystroke;

/// Result of handling a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute this command
    Execute(Command),
    /// No binding, but the key types this character
    Insert(char),
    /// No binding matches this keystroke
    NoMatch,
}

impl KeyAction {
    /// Convert to the message a session should receive
    pub fn to_msg(self) -> Option<EditMsg> {
        match self {
            KeyAction::Execute(command) => command.to_msg(),
            KeyAction::Insert(ch) => Some(EditMsg::InsertChar(ch)),
            KeyAction::NoMatch => None,
        }
    }
}

/// The keymap stores all keybindings and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    /// All registered bindings
    bindings: Vec<Keybinding>,
    /// Fast lookup (index into bindings, first registered wins)
    lookup: HashMap<Keystroke, usize>,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    /// Add a binding to the keymap
    pub fn add_binding(&mut self, binding: Keybinding) {
        if binding.command == Command::Unbound {
            return;
        }
        let idx = self.bindings.len();
        self.lookup.entry(binding.keystroke).or_insert(idx);
        self.bindings.push(binding);
    }

    /// Handle a keystroke and return the action to take
    pub fn handle_keystroke(&self, keystroke: Keystroke) -> KeyAction {
        if let Some(command) = self.lookup(&keystroke) {
            return KeyAction::Execute(command);
        }
        match keystroke.text() {
            Some(ch) => KeyAction::Insert(ch),
            None => KeyAction::NoMatch,
        }
    }

    /// Look up the command bound to a keystroke
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        let idx = *self.lookup.get(keystroke)?;
        Some(self.bindings[idx].command)
    }

    /// Get all bindings
    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

}
