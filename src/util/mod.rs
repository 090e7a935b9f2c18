//! Utility modules

pub mod text;

pub use text::{
    char_len, char_to_byte, has_line_break, is_line_break, leading_whitespace_len, replace_chars,
};
