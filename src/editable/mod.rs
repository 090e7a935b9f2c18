//! Single-line text editing engine.
//!
//! This module edits one line of text held by an external surface, with a
//! snapshot-based undo/redo history and offset-preserving indentation.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`TextSurface`]: Trait abstracting the live object that holds the text
//! - [`StringSurface`]: Headless surface backed by `String`
//! - [`EditHistory`] / [`Snapshot`]: Bounded undo stack plus redo stack
//! - [`transform`]: Pure indent, unindent and paste sanitization
//! - [`Debouncer`] / [`Clock`]: Explicit timer that coalesces typing
//! - [`EditingSession`]: State machine tying the pieces together
//! - [`EditMsg`]: Message type for all editing operations
//!
//! # Example
//!
//! ```ignore
//! use oneline::editable::{EditingSession, SessionOptions, StringSurface};
//!
//! let mut session = EditingSession::new(SessionOptions::default());
//! session.attach(StringSurface::from_text("hello"), |done| {
//!     println!("{}", done.content);
//! });
//!
//! session.insert_char('!');
//! session.indent();
//! session.commit();
//! ```

mod debounce;
mod history;
mod messages;
mod options;
mod selection;
mod session;
mod surface;
pub mod transform;

// Re-export main types
pub use debounce::{Clock, Debouncer, ManualClock, SystemClock, DEFAULT_DEBOUNCE};
pub use history::{EditHistory, Snapshot, DEFAULT_MAX_HISTORY};
pub use messages::EditMsg;
pub use options::{CancelPolicy, SessionOptions};
pub use selection::Selection;
pub use session::{EditingSession, FinalizeCallback, FinalizeReason, Finalization, SessionState};
pub use surface::{StringSurface, TextSurface};
pub use transform::{Edit, DEFAULT_INDENT_UNIT};
