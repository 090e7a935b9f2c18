//! Char-offset helpers for single-line text

/// Number of chars (Unicode scalar values) in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Convert a char offset to a byte offset, clamping to the end of `text`
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Characters that would split the line in two
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\r' | '\n')
}

/// Whether `text` contains any line break
pub fn has_line_break(text: &str) -> bool {
    text.chars().any(is_line_break)
}

/// Count of leading whitespace chars
pub fn leading_whitespace_len(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

/// Replace the chars in `start..end` with `replacement`.
/// Offsets are char offsets and are clamped to the text.
pub fn replace_chars(text: &str, start: usize, end: usize, replacement: &str) -> String {
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end.max(start));
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..start_byte]);
    out.push_str(replacement);
    out.push_str(&text[end_byte..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_byte_utf8() {
        let text = "héllo";
        assert_eq!(char_to_byte(text, 0), 0);
        assert_eq!(char_to_byte(text, 2), 3); // é is 2 bytes
        assert_eq!(char_to_byte(text, 99), text.len());
    }

    #[test]
    fn test_leading_whitespace_len() {
        assert_eq!(leading_whitespace_len("  \tx "), 3);
        assert_eq!(leading_whitespace_len("x"), 0);
        assert_eq!(leading_whitespace_len(""), 0);
    }

    #[test]
    fn test_replace_chars() {
        assert_eq!(replace_chars("hello", 1, 3, "EE"), "hEElo");
        assert_eq!(replace_chars("héllo", 1, 2, "e"), "hello");
        assert_eq!(replace_chars("abc", 3, 3, "d"), "abcd");
        assert_eq!(replace_chars("abc", 9, 12, "d"), "abcd");
    }

    #[test]
    fn test_line_breaks() {
        assert!(has_line_break("a\nb"));
        assert!(has_line_break("a\rb"));
        assert!(!has_line_break("a b"));
    }
}
