//! Structural edits: indent, unindent and paste sanitization.
//!
//! Every function here is pure. It takes the line and selection, and returns
//! the new pair as one [`Edit`] so the session can apply both in one step.

use crate::util::{char_len, is_line_break, leading_whitespace_len, replace_chars};

use super::selection::Selection;

/// Default indent unit: four spaces
pub const DEFAULT_INDENT_UNIT: &str = "    ";

/// Result of a structural edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub content: String,
    pub selection: Selection,
}

/// Insert `text` in place of the selection, leaving a caret after it
pub fn insert_at_selection(content: &str, selection: Selection, text: &str) -> Edit {
    let start = selection.min();
    Edit {
        content: replace_chars(content, start, selection.max(), text),
        selection: Selection::collapsed(start + char_len(text)),
    }
}

/// Insert one indent unit.
///
/// A caret gets the unit inserted at its position and ends up after it. A
/// range gets the unit inserted once, at its lower bound, and both ends shift
/// right so the same text stays selected.
pub fn indent(content: &str, selection: Selection, unit: &str) -> Edit {
    if selection.is_collapsed() {
        return insert_at_selection(content, selection, unit);
    }

    let start = selection.min();
    let end = selection.max();
    let shift = char_len(unit);
    Edit {
        content: replace_chars(content, start, start, unit),
        selection: Selection::new(start, end).shifted_right(shift),
    }
}

/// Remove at most one indent unit from the start of the line.
///
/// This looks at the start of the whole line, not at the caret. The exact
/// unit is removed if present; otherwise up to `len(unit)` leading whitespace
/// chars are. Returns `None` when the line has no leading whitespace.
pub fn unindent(content: &str, selection: Selection, unit: &str) -> Option<Edit> {
    let removed = if !unit.is_empty() && content.starts_with(unit) {
        char_len(unit)
    } else {
        leading_whitespace_len(content).min(char_len(unit))
    };
    if removed == 0 {
        return None;
    }

    Some(Edit {
        content: replace_chars(content, 0, removed, ""),
        selection: selection.shifted_left(removed),
    })
}

/// Collapse every run of line-break characters to a single space
pub fn sanitize_paste(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;
    for ch in text.chars() {
        if is_line_break(ch) {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
        } else {
            out.push(ch);
            in_break = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_collapsed_caret() {
        let edit = indent("abc", Selection::collapsed(1), "  ");
        assert_eq!(edit.content, "a  bc");
        assert_eq!(edit.selection, Selection::collapsed(3));
    }

    #[test]
    fn test_indent_range_inserts_once_at_start() {
        let edit = indent("hello world", Selection::new(6, 11), DEFAULT_INDENT_UNIT);
        assert_eq!(edit.content, "hello     world");
        assert_eq!(edit.selection, Selection::new(10, 15));
    }

    #[test]
    fn test_indent_reversed_range_is_normalized() {
        let edit = indent("abcdef", Selection::new(4, 2), "\t");
        assert_eq!(edit.content, "ab\tcdef");
        assert_eq!(edit.selection, Selection::new(3, 5));
    }

    #[test]
    fn test_unindent_exact_unit() {
        let edit = unindent("    x", Selection::collapsed(5), "    ").unwrap();
        assert_eq!(edit.content, "x");
        assert_eq!(edit.selection, Selection::collapsed(1));
    }

    #[test]
    fn test_unindent_partial_whitespace() {
        let edit = unindent(" x", Selection::collapsed(2), "    ").unwrap();
        assert_eq!(edit.content, "x");
        assert_eq!(edit.selection, Selection::collapsed(1));
    }

    #[test]
    fn test_unindent_removes_at_most_one_unit() {
        let edit = unindent("\t\t\t\t\tx", Selection::new(0, 6), "    ").unwrap();
        assert_eq!(edit.content, "\tx");
        assert_eq!(edit.selection, Selection::new(0, 2));
    }

    #[test]
    fn test_unindent_ignores_caret_position() {
        let edit = unindent("    abc", Selection::collapsed(2), "    ").unwrap();
        assert_eq!(edit.content, "abc");
        assert_eq!(edit.selection, Selection::collapsed(0));
    }

    #[test]
    fn test_unindent_without_whitespace_is_noop() {
        assert_eq!(unindent("x", Selection::collapsed(1), "    "), None);
        assert_eq!(unindent("", Selection::collapsed(0), "    "), None);
    }

    #[test]
    fn test_sanitize_paste() {
        assert_eq!(
            sanitize_paste("line1\nline2\r\nline3"),
            "line1 line2 line3"
        );
        assert_eq!(sanitize_paste("a\n\n\r\rb"), "a b");
        assert_eq!(sanitize_paste("\nlead"), " lead");
        assert_eq!(sanitize_paste("plain"), "plain");
    }

    #[test]
    fn test_insert_at_selection() {
        let edit = insert_at_selection("hello", Selection::new(1, 4), "ipp");
        assert_eq!(edit.content, "hippo");
        assert_eq!(edit.selection, Selection::collapsed(4));
    }
}
