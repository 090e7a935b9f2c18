//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use oneline::editable::{
    EditingSession, Finalization, ManualClock, Selection, SessionOptions, StringSurface,
    TextSurface,
};

pub type TestSession = EditingSession<StringSurface, ManualClock>;
pub type Finalized = Rc<RefCell<Vec<Finalization>>>;

/// Create an attached session with the caret at `caret`
pub fn test_session(text: &str, caret: usize) -> (TestSession, ManualClock, Finalized) {
    test_session_with(text, Selection::collapsed(caret), SessionOptions::default())
}

/// Create an attached session with an explicit selection and options
pub fn test_session_with(
    text: &str,
    selection: Selection,
    options: SessionOptions,
) -> (TestSession, ManualClock, Finalized) {
    let clock = ManualClock::new();
    let mut session = EditingSession::with_clock(options, clock.clone());
    let finalized: Finalized = Rc::default();
    let sink = finalized.clone();
    session.attach(StringSurface::with_selection(text, selection), move |f| {
        sink.borrow_mut().push(f)
    });
    (session, clock, finalized)
}

/// Live text of the session's surface
pub fn content(session: &TestSession) -> String {
    session.content().unwrap_or_default()
}

/// Live selection of the session's surface
pub fn selection(session: &TestSession) -> Selection {
    session.surface().map(|s| s.selection()).unwrap_or_default()
}

/// Type `text` and let the debounce timer fire, committing one snapshot
pub fn type_and_settle(session: &mut TestSession, clock: &ManualClock, text: &str) {
    for ch in text.chars() {
        session.insert_char(ch);
    }
    clock.advance(session.options().debounce);
    session.tick();
}
