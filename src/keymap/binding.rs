//! Keybinding struct representing a mapping from a keystroke to a command

use super::command::Command;
use super::types::Keystroke;

/// A single keybinding mapping one keystroke to a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self { keystroke, command }
    }
}
