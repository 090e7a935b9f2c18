//! EditingSession - binds a text surface, a snapshot history and a debounce
//! timer into one single-line editing session.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --attach--> Active --commit/cancel--> Finalized
//! ```
//!
//! While active every mutation goes straight to the surface. The history is a
//! separate log of past states: typing is committed to it once the debounce
//! timer runs out, deletions and structural edits commit immediately. Once
//! finalized, the surface is detached and every call is a silent no-op.

use std::fmt;
use std::time::Instant;

use crate::util::{has_line_break, is_line_break};

use super::debounce::{Clock, Debouncer, SystemClock};
use super::history::{EditHistory, Snapshot};
use super::messages::EditMsg;
use super::options::{CancelPolicy, SessionOptions};
use super::selection::Selection;
use super::surface::TextSurface;
use super::transform::{self, Edit};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active,
    Finalized,
}

/// Which key ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizeReason {
    Commit,
    Cancel,
}

/// Value handed to the finalization callback
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Finalization {
    pub reason: FinalizeReason,
    pub content: String,
}

impl Finalization {
    pub fn is_cancel(&self) -> bool {
        self.reason == FinalizeReason::Cancel
    }
}

/// One-shot callback receiving the session result
pub type FinalizeCallback = Box<dyn FnOnce(Finalization)>;

/// A single-line editing session over a [`TextSurface`].
pub struct EditingSession<S, C = SystemClock> {
    surface: Option<S>,
    history: EditHistory,
    /// State captured on attach, used by [`CancelPolicy::RevertToOriginal`]
    original: Snapshot,
    timer: Debouncer,
    /// Selection to apply once the surface has settled after a content write
    pending_selection: Option<Selection>,
    on_finalize: Option<FinalizeCallback>,
    state: SessionState,
    options: SessionOptions,
    clock: C,
}

impl<S: TextSurface> EditingSession<S, SystemClock> {
    /// Create a session driven by the wall clock
    pub fn new(options: SessionOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }
}

impl<S: TextSurface, C: Clock> EditingSession<S, C> {
    /// Create a session driven by `clock`
    pub fn with_clock(options: SessionOptions, clock: C) -> Self {
        Self {
            surface: None,
            history: EditHistory::with_max_history(options.max_history),
            original: Snapshot::default(),
            timer: Debouncer::new(options.debounce),
            pending_selection: None,
            on_finalize: None,
            state: SessionState::Uninitialized,
            options,
            clock,
        }
    }

    /// Start editing `surface`. `on_finalize` runs once, on commit or cancel.
    ///
    /// Returns false if the session was already attached or finalized.
    pub fn attach<F>(&mut self, mut surface: S, on_finalize: F) -> bool
    where
        F: FnOnce(Finalization) + 'static,
    {
        if self.state != SessionState::Uninitialized {
            tracing::debug!("attach ignored: session is {:?}", self.state);
            return false;
        }

        if let Some(enabled) = self.options.spellcheck {
            surface.set_spellcheck(enabled);
        }

        let initial = Snapshot::new(surface.content(), surface.selection());
        tracing::debug!(
            "Session attached ({} chars, max_history={})",
            initial.content.chars().count(),
            self.history.max_history()
        );
        self.history.initialize(initial.clone());
        self.original = initial;
        self.surface = Some(surface);
        self.on_finalize = Some(Box::new(on_finalize));
        self.state = SessionState::Active;
        true
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// The attached surface, if the session is active
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Live content of the attached surface
    pub fn content(&self) -> Option<String> {
        self.surface.as_ref().map(|s| s.content())
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// When the host should call [`EditingSession::tick`] next
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.pending_selection.is_some() {
            return Some(self.clock.now());
        }
        self.timer.deadline()
    }

    /// Whether a selection restore is waiting for the next tick
    pub fn has_pending_selection(&self) -> bool {
        self.pending_selection.is_some()
    }

    /// Dispatch a message. Returns true if the message had an effect.
    pub fn handle(&mut self, msg: EditMsg) -> bool {
        let _span = tracing::trace_span!("edit", msg = msg.name()).entered();
        match msg {
            EditMsg::InsertChar(ch) => self.insert_char(ch),
            EditMsg::InsertText(text) => self.insert_text(&text),
            EditMsg::Paste(text) => self.paste(&text),
            EditMsg::DeleteBackward => self.delete_backward(),
            EditMsg::DeleteForward => self.delete_forward(),
            EditMsg::Indent => self.indent(),
            EditMsg::Unindent => self.unindent(),
            EditMsg::Undo => self.undo(),
            EditMsg::Redo => self.redo(),
            EditMsg::ToggleSpellCheck => self.toggle_spellcheck(),
            EditMsg::Commit => self.commit(),
            EditMsg::Cancel => self.cancel(),
        }
    }

    /// Advance scheduled work: apply a deferred selection restore, then
    /// commit to history if the debounce timer has run out.
    ///
    /// Returns true if a snapshot was committed.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.settle();

        if self.timer.fire_if_due(self.clock.now()) {
            return self.record_if_changed();
        }
        false
    }

    /// Commit the live surface state to history if its content changed
    pub fn record_if_changed(&mut self) -> bool {
        let Some(surface) = self.surface.as_ref() else {
            return false;
        };
        let content = surface.content();
        self.history.record_if_changed(&content, surface.selection())
    }

    /// Move the caret or selection from the host side (pointer, arrow keys).
    ///
    /// Offsets past the end collapse to the end. Content is untouched, so
    /// the history and the debounce timer are left alone.
    pub fn select(&mut self, selection: Selection) -> bool {
        if !self.begin("select") {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        surface.set_selection(selection.resolve(surface.len_chars()));
        true
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Insert a typed character at the selection
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !self.begin("insert_char") {
            return false;
        }
        if is_line_break(ch) {
            tracing::trace!("Rejected line break in single-line input");
            return false;
        }

        if let Some(surface) = self.surface.as_mut() {
            let mut buf = [0; 4];
            surface.insert_text_at_selection(ch.encode_utf8(&mut buf));
        }
        self.on_input();
        true
    }

    /// Insert typed text at the selection. Text containing line breaks is
    /// rejected; clipboard text goes through [`EditingSession::paste`].
    pub fn insert_text(&mut self, text: &str) -> bool {
        if !self.begin("insert_text") {
            return false;
        }
        if text.is_empty() {
            return false;
        }
        if has_line_break(text) {
            tracing::trace!("Rejected line break in single-line input");
            return false;
        }

        if let Some(surface) = self.surface.as_mut() {
            surface.insert_text_at_selection(text);
        }
        self.on_input();
        true
    }

    /// Paste clipboard text, replacing the selection.
    ///
    /// The pre-paste state is committed first so one undo takes the paste back.
    pub fn paste(&mut self, payload: &str) -> bool {
        if !self.begin("paste") {
            return false;
        }
        self.record_if_changed();

        let text = transform::sanitize_paste(payload);
        if let Some(surface) = self.surface.as_mut() {
            surface.insert_text_at_selection(&text);
        }
        self.on_input();
        true
    }

    /// Backspace. The pre-deletion state is committed first.
    pub fn delete_backward(&mut self) -> bool {
        if !self.begin("delete_backward") {
            return false;
        }
        self.record_if_changed();

        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let selection = surface.selection();
        if selection.is_collapsed() {
            let at = selection.start.min(surface.len_chars());
            if at == 0 {
                return false;
            }
            surface.set_selection(Selection::new(at - 1, at));
        }
        surface.insert_text_at_selection("");
        self.on_input();
        true
    }

    /// Delete key. The pre-deletion state is committed first.
    pub fn delete_forward(&mut self) -> bool {
        if !self.begin("delete_forward") {
            return false;
        }
        self.record_if_changed();

        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let selection = surface.selection();
        if selection.is_collapsed() {
            let at = selection.start;
            if at >= surface.len_chars() {
                return false;
            }
            surface.set_selection(Selection::new(at, at + 1));
        }
        surface.insert_text_at_selection("");
        self.on_input();
        true
    }

    // =========================================================================
    // Structural edits
    // =========================================================================

    /// Insert one indent unit at the selection (Tab)
    pub fn indent(&mut self) -> bool {
        if !self.begin("indent") {
            return false;
        }
        self.record_if_changed();

        let Some(surface) = self.surface.as_ref() else {
            return false;
        };
        let edit = transform::indent(
            &surface.content(),
            surface.selection(),
            &self.options.indent_unit,
        );
        self.apply_edit(edit);
        true
    }

    /// Remove one indent unit from the start of the line (Shift+Tab)
    pub fn unindent(&mut self) -> bool {
        if !self.begin("unindent") {
            return false;
        }
        self.record_if_changed();

        let Some(surface) = self.surface.as_ref() else {
            return false;
        };
        let Some(edit) = transform::unindent(
            &surface.content(),
            surface.selection(),
            &self.options.indent_unit,
        ) else {
            tracing::trace!("unindent: no leading whitespace");
            return false;
        };
        self.apply_edit(edit);
        true
    }

    /// Write a structural edit to the surface and commit it as one step
    fn apply_edit(&mut self, edit: Edit) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.set_content(&edit.content);
        surface.set_selection(edit.selection);
        self.timer.cancel();
        self.history.record_if_changed(&edit.content, edit.selection);
    }

    // =========================================================================
    // Undo/Redo
    // =========================================================================

    /// Restore the previous snapshot.
    ///
    /// Uncommitted typing is committed first, so undo always steps back
    /// exactly one visible state. The selection is restored on the next tick.
    pub fn undo(&mut self) -> bool {
        if !self.begin("undo") {
            return false;
        }
        self.timer.cancel();
        self.record_if_changed();

        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let current = Snapshot::new(surface.content(), surface.selection());
        let Some(prev) = self.history.undo(current) else {
            tracing::trace!("undo: nothing to undo");
            return false;
        };

        surface.set_content(&prev.content);
        self.pending_selection = Some(prev.selection);
        tracing::debug!(
            "undo: restored snapshot (undo={}, redo={})",
            self.history.undo_count(),
            self.history.redo_count()
        );
        true
    }

    /// Restore the snapshot most recently undone.
    ///
    /// Uncommitted typing is committed first, which discards the redo stack.
    pub fn redo(&mut self) -> bool {
        if !self.begin("redo") {
            return false;
        }
        self.timer.cancel();
        self.record_if_changed();

        let Some(next) = self.history.redo() else {
            tracing::trace!("redo: nothing to redo");
            return false;
        };
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        surface.set_content(&next.content);
        self.pending_selection = Some(next.selection);
        tracing::debug!(
            "redo: restored snapshot (undo={}, redo={})",
            self.history.undo_count(),
            self.history.redo_count()
        );
        true
    }

    // =========================================================================
    // Spellcheck
    // =========================================================================

    /// Flip spellchecking on the surface (Ctrl+M)
    pub fn toggle_spellcheck(&mut self) -> bool {
        let enabled = match self.surface.as_ref() {
            Some(surface) => !surface.spellcheck(),
            None => return false,
        };
        self.set_spellcheck(enabled)
    }

    /// Set spellchecking on the surface.
    ///
    /// The surface is refreshed so it re-evaluates the text, and the selection
    /// is put back where it was.
    pub fn set_spellcheck(&mut self, enabled: bool) -> bool {
        if !self.begin("set_spellcheck") {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        let selection = surface.selection();
        surface.set_spellcheck(enabled);
        let content = surface.content();
        surface.set_content(&content);
        surface.set_selection(selection);
        tracing::debug!("Spellcheck {}", if enabled { "enabled" } else { "disabled" });
        true
    }

    // =========================================================================
    // Finalization
    // =========================================================================

    /// Finish with the current content (Enter)
    pub fn commit(&mut self) -> bool {
        self.finalize(FinalizeReason::Commit)
    }

    /// Finish via Escape. See [`CancelPolicy`] for what it resolves with.
    pub fn cancel(&mut self) -> bool {
        self.finalize(FinalizeReason::Cancel)
    }

    fn finalize(&mut self, reason: FinalizeReason) -> bool {
        if self.state != SessionState::Active {
            tracing::trace!("{:?} ignored: session is {:?}", reason, self.state);
            return false;
        }

        self.timer.cancel();
        self.pending_selection = None;

        let revert = reason == FinalizeReason::Cancel
            && self.options.cancel_policy == CancelPolicy::RevertToOriginal;
        let content = match self.surface.take() {
            Some(mut surface) if revert => {
                surface.set_content(&self.original.content);
                surface.set_selection(self.original.selection);
                self.original.content.clone()
            }
            Some(surface) => surface.content(),
            None => String::new(),
        };
        self.state = SessionState::Finalized;

        tracing::debug!(
            "Session finalized by {:?} ({} chars)",
            reason,
            content.chars().count()
        );
        if let Some(on_finalize) = self.on_finalize.take() {
            on_finalize(Finalization { reason, content });
        }
        true
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Gate for every operation: only active sessions act, and a deferred
    /// selection restore is applied before anything reads the surface.
    fn begin(&mut self, op: &str) -> bool {
        if self.state != SessionState::Active {
            tracing::trace!("{} ignored: session is {:?}", op, self.state);
            return false;
        }
        self.settle();
        true
    }

    /// Apply a deferred selection restore
    fn settle(&mut self) {
        let Some(selection) = self.pending_selection.take() else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let resolved = selection.resolve(surface.len_chars());
        if resolved != selection {
            tracing::debug!(
                "Selection {:?} is past the end of the text, collapsing to end",
                selection
            );
        }
        surface.set_selection(resolved);
    }

    /// Content changed: restart the quiet period
    fn on_input(&mut self) {
        self.timer.arm(self.clock.now());
    }
}

impl<S: fmt::Debug, C> fmt::Debug for EditingSession<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditingSession")
            .field("state", &self.state)
            .field("surface", &self.surface)
            .field("history", &self.history)
            .field("pending_selection", &self.pending_selection)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
