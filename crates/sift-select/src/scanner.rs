//! Lexical helpers shared by the matcher primitives.
//!
//! Every helper measures a prefix of the remaining selector text and returns
//! its length in bytes, so callers can slice the text without re-scanning.

/// Check if a character can start an identifier.
/// [§ 4.3.10 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
pub const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Check if a character can continue an identifier.
/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
pub const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

/// Attribute names accept word characters and `-`.
fn is_attr_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Length of the longest prefix whose characters all satisfy `pred`.
fn run_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.find(|c: char| !pred(c)).unwrap_or(text.len())
}

/// Length of a run of identifier characters (`-`, digits and letters).
///
/// Used for id and class values, which may start with a digit.
pub fn ident_len(text: &str) -> usize {
    run_len(text, is_ident_char)
}

/// Length of an element name: an ident-start character followed by
/// identifier characters, or 0.
pub fn name_len(text: &str) -> usize {
    match text.chars().next() {
        Some(c) if is_ident_start_char(c) => c.len_utf8() + ident_len(&text[c.len_utf8()..]),
        _ => 0,
    }
}

/// Length of an attribute name.
pub fn attr_name_len(text: &str) -> usize {
    run_len(text, is_attr_name_char)
}

/// Length of leading whitespace.
pub fn whitespace_len(text: &str) -> usize {
    run_len(text, char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_len_stops_at_delimiters() {
        assert_eq!(name_len("div#main"), 3);
        assert_eq!(name_len("h1.title"), 2);
        assert_eq!(name_len("my-tag[x]"), 6);
        assert_eq!(name_len("1abc"), 0);
        assert_eq!(name_len(""), 0);
        assert_eq!(name_len("é-x y"), 4);
    }

    #[test]
    fn test_ident_len_allows_leading_digit() {
        assert_eq!(ident_len("1col.x"), 4);
        assert_eq!(ident_len("nav-bar:first-child"), 7);
        assert_eq!(ident_len(".x"), 0);
    }

    #[test]
    fn test_attr_name_and_whitespace() {
        assert_eq!(attr_name_len("data-id=3"), 7);
        assert_eq!(attr_name_len("~=x"), 0);
        assert_eq!(whitespace_len(" \t\nx"), 3);
        assert_eq!(whitespace_len("x "), 0);
    }
}
