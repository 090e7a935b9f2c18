//! oneline - single-line text editing engine
//!
//! This crate provides a headless editing session for one line of text:
//! snapshot-based undo/redo, offset-preserving indentation, paste
//! sanitization and a one-shot commit/cancel callback. Keystrokes reach the
//! session through a YAML-configurable keymap.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod keymap;
pub mod script;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::EditorConfig;
pub use editable::{
    EditMsg, EditingSession, Finalization, FinalizeReason, Selection, SessionOptions,
    StringSurface, TextSurface,
};
pub use keymap::Keymap;
