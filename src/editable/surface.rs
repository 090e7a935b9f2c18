//! Text surface abstraction for the single-line editing engine.
//!
//! The session never keeps its own copy of the line: whatever object shows the
//! text (a widget, a terminal prompt, a test harness) is the source of truth
//! and is reached only through [`TextSurface`]. Offset-to-position mapping is
//! the surface's business.

use crate::util::{char_len, replace_chars};

use super::selection::Selection;

/// The live, mutable object holding the text being edited.
pub trait TextSurface {
    /// Current content, flattened to a single string
    fn content(&self) -> String;

    /// Replace the whole content. Implementations may reset the selection.
    fn set_content(&mut self, text: &str);

    /// Current selection in char offsets over [`TextSurface::content`]
    fn selection(&self) -> Selection;

    /// Place the selection. Offsets past the end collapse to the end.
    fn set_selection(&mut self, selection: Selection);

    /// Replace the active selection with `text`, leaving a caret after it
    fn insert_text_at_selection(&mut self, text: &str);

    /// Length of the content in chars
    fn len_chars(&self) -> usize {
        char_len(&self.content())
    }

    /// Whether spellchecking is currently shown on the surface
    fn spellcheck(&self) -> bool {
        false
    }

    /// Turn spellchecking on or off. Surfaces without one ignore it.
    fn set_spellcheck(&mut self, _enabled: bool) {}
}

impl<T: TextSurface + ?Sized> TextSurface for &mut T {
    fn content(&self) -> String {
        (**self).content()
    }

    fn set_content(&mut self, text: &str) {
        (**self).set_content(text)
    }

    fn selection(&self) -> Selection {
        (**self).selection()
    }

    fn set_selection(&mut self, selection: Selection) {
        (**self).set_selection(selection)
    }

    fn insert_text_at_selection(&mut self, text: &str) {
        (**self).insert_text_at_selection(text)
    }

    fn len_chars(&self) -> usize {
        (**self).len_chars()
    }

    fn spellcheck(&self) -> bool {
        (**self).spellcheck()
    }

    fn set_spellcheck(&mut self, enabled: bool) {
        (**self).set_spellcheck(enabled)
    }
}

// =============================================================================
// StringSurface - headless surface backed by a String
// =============================================================================

/// Headless [`TextSurface`] wrapping a `String`. Used by the CLI and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSurface {
    text: String,
    selection: Selection,
    spellcheck: bool,
}

impl StringSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface with the caret at the end of `s`
    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
            selection: Selection::collapsed(char_len(s)),
            spellcheck: false,
        }
    }

    /// Create a surface with an explicit selection
    pub fn with_selection(s: &str, selection: Selection) -> Self {
        let mut surface = Self::from_text(s);
        surface.set_selection(selection);
        surface
    }

    /// Access the underlying string
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TextSurface for StringSurface {
    fn content(&self) -> String {
        self.text.clone()
    }

    fn set_content(&mut self, text: &str) {
        self.text = text.to_string();
        // Rewriting the text invalidates the old caret, like a DOM text node rebuild
        self.selection = Selection::collapsed(char_len(&self.text));
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.resolve(char_len(&self.text));
    }

    fn insert_text_at_selection(&mut self, text: &str) {
        let start = self.selection.min();
        let end = self.selection.max();
        self.text = replace_chars(&self.text, start, end, text);
        self.selection = Selection::collapsed(start + char_len(text));
    }

    fn len_chars(&self) -> usize {
        char_len(&self.text)
    }

    fn spellcheck(&self) -> bool {
        self.spellcheck
    }

    fn set_spellcheck(&mut self, enabled: bool) {
        self.spellcheck = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_surface_basic() {
        let surface = StringSurface::from_text("hello");
        assert_eq!(surface.content(), "hello");
        assert_eq!(surface.len_chars(), 5);
        assert_eq!(surface.selection(), Selection::collapsed(5));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut surface = StringSurface::with_selection("hello world", Selection::new(6, 11));
        surface.insert_text_at_selection("there");
        assert_eq!(surface.as_str(), "hello there");
        assert_eq!(surface.selection(), Selection::collapsed(11));
    }

    #[test]
    fn test_insert_replaces_reversed_selection() {
        let mut surface = StringSurface::with_selection("abcdef", Selection::new(4, 1));
        surface.insert_text_at_selection("X");
        assert_eq!(surface.as_str(), "aXef");
        assert_eq!(surface.selection(), Selection::collapsed(2));
    }

    #[test]
    fn test_insert_utf8() {
        let mut surface = StringSurface::with_selection("héllo", Selection::collapsed(2));
        surface.insert_text_at_selection("X");
        assert_eq!(surface.as_str(), "héXllo");
        assert_eq!(surface.selection(), Selection::collapsed(3));
    }

    #[test]
    fn test_set_selection_past_end_collapses_to_end() {
        let mut surface = StringSurface::from_text("abc");
        surface.set_selection(Selection::new(1, 10));
        assert_eq!(surface.selection(), Selection::collapsed(3));
    }

    #[test]
    fn test_set_content_resets_caret() {
        let mut surface = StringSurface::with_selection("abcdef", Selection::new(0, 2));
        surface.set_content("xy");
        assert_eq!(surface.selection(), Selection::collapsed(2));
    }

    #[test]
    fn test_mut_ref_is_a_surface() {
        let mut surface = StringSurface::from_text("ab");
        {
            let mut borrowed = &mut surface;
            borrowed.insert_text_at_selection("c");
            borrowed.set_spellcheck(true);
        }
        assert_eq!(surface.as_str(), "abc");
        assert!(surface.spellcheck());
    }
}
