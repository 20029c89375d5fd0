//! [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)

use std::fmt;

use sift_dom::ElementData;
use strum_macros::{Display, EnumString};

use crate::scanner::{attr_name_len, whitespace_len};

/// The operator between an attribute name and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum AttrOperator {
    /// `=`
    #[strum(serialize = "=")]
    Equals,
    /// `~=`
    #[strum(serialize = "~=")]
    Includes,
    /// `|=`
    #[strum(serialize = "|=")]
    DashMatch,
    /// `^=`
    #[strum(serialize = "^=")]
    Prefix,
    /// `$=`
    #[strum(serialize = "$=")]
    Suffix,
    /// `*=`
    #[strum(serialize = "*=")]
    Substring,
}

/// Attribute selectors per [§ 6.4](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// Operators other than [`AttributeSelector::Exists`] compare against the
/// string form of the value (list values joined by a single space), except
/// [`AttributeSelector::Includes`], which compares whole tokens. An absent
/// attribute never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]`: "Represents an element with the att attribute"
    ///
    /// Example: `[href]` matches any element that has an `href` attribute
    Exists(String),

    /// `[attr=value]`: "Represents an element with the att attribute whose value
    /// is exactly 'val'."
    ///
    /// Example: `[type="text"]` matches `<input type="text">` but not `<input type="password">`
    Equals(String, String),

    /// `[attr~=value]`: "Represents an element with the att attribute whose value
    /// is a whitespace-separated list of words, one of which is exactly 'val'."
    ///
    /// Example: `[class~="active"]` matches `<div class="btn active">`
    Includes(String, String),

    /// `[attr|=value]`: "Represents an element with the att attribute, its value
    /// either being exactly 'val' or beginning with 'val' immediately followed by '-'."
    ///
    /// Example: `[lang|="en"]` matches `<p lang="en">` and `<p lang="en-US">`
    DashMatch(String, String),

    /// `[attr^=value]`: "Represents an element with the att attribute whose value
    /// begins with the prefix 'val'."
    ///
    /// Example: `[href^="https"]` matches `<a href="https://example.com">`
    PrefixMatch(String, String),

    /// `[attr$=value]`: "Represents an element with the att attribute whose value
    /// ends with the suffix 'val'."
    ///
    /// Example: `[src$=".png"]` matches `<img src="photo.png">`
    SuffixMatch(String, String),

    /// `[attr*=value]`: "Represents an element with the att attribute whose value
    /// contains at least one instance of the substring 'val'."
    ///
    /// Example: `[data-theme*="dark"]` matches `<div data-theme="my-dark-mode">`
    SubstringMatch(String, String),
}

impl AttributeSelector {
    /// Build a selector from its parts. `None` means a bare `[name]`.
    #[must_use]
    pub fn new(name: impl Into<String>, operation: Option<(AttrOperator, String)>) -> Self {
        let name = name.into();
        match operation {
            None => Self::Exists(name),
            Some((AttrOperator::Equals, value)) => Self::Equals(name, value),
            Some((AttrOperator::Includes, value)) => Self::Includes(name, value),
            Some((AttrOperator::DashMatch, value)) => Self::DashMatch(name, value),
            Some((AttrOperator::Prefix, value)) => Self::PrefixMatch(name, value),
            Some((AttrOperator::Suffix, value)) => Self::SuffixMatch(name, value),
            Some((AttrOperator::Substring, value)) => Self::SubstringMatch(name, value),
        }
    }

    /// The attribute name tested.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Exists(name)
            | Self::Equals(name, _)
            | Self::Includes(name, _)
            | Self::DashMatch(name, _)
            | Self::PrefixMatch(name, _)
            | Self::SuffixMatch(name, _)
            | Self::SubstringMatch(name, _) => name,
        }
    }

    /// The operator and operand, or `None` for a presence test.
    #[must_use]
    pub fn operation(&self) -> Option<(AttrOperator, &str)> {
        match self {
            Self::Exists(_) => None,
            Self::Equals(_, v) => Some((AttrOperator::Equals, v)),
            Self::Includes(_, v) => Some((AttrOperator::Includes, v)),
            Self::DashMatch(_, v) => Some((AttrOperator::DashMatch, v)),
            Self::PrefixMatch(_, v) => Some((AttrOperator::Prefix, v)),
            Self::SuffixMatch(_, v) => Some((AttrOperator::Suffix, v)),
            Self::SubstringMatch(_, v) => Some((AttrOperator::Substring, v)),
        }
    }

    /// Consume `[name]` or `[name op value]` from the front of `text`.
    ///
    /// The value may be bare or wrapped in double or single quotes, and
    /// whitespace is allowed around it. Returns the consumed length.
    pub(crate) fn parse(text: &str) -> Option<(usize, Self)> {
        let rest = text.strip_prefix('[')?;
        let name_len = attr_name_len(rest);
        if name_len == 0 {
            return None;
        }
        let name = &rest[..name_len];
        let mut pos = 1 + name_len;
        pos += whitespace_len(&text[pos..]);

        let Some((operator, op_len)) = parse_operator(&text[pos..]) else {
            return text[pos..]
                .starts_with(']')
                .then(|| (pos + 1, Self::Exists(name.to_string())));
        };
        pos += op_len;
        pos += whitespace_len(&text[pos..]);

        let (value, value_len) = parse_value(&text[pos..])?;
        pos += value_len;
        pos += whitespace_len(&text[pos..]);
        if !text[pos..].starts_with(']') {
            return None;
        }

        Some((
            pos + 1,
            Self::new(name, Some((operator, value.to_string()))),
        ))
    }

    /// Check if the element carries a matching attribute.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        let Some(attr) = element.attribute(self.name()) else {
            return false;
        };
        match self {
            Self::Exists(_) => true,
            Self::Includes(_, val) => attr.contains_token(val),
            Self::Equals(_, val) => attr.joined() == val.as_str(),
            Self::DashMatch(_, val) => {
                let value = attr.joined();
                value == val.as_str()
                    || value
                        .strip_prefix(val.as_str())
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            Self::PrefixMatch(_, val) => attr.joined().starts_with(val.as_str()),
            Self::SuffixMatch(_, val) => attr.joined().ends_with(val.as_str()),
            Self::SubstringMatch(_, val) => attr.joined().contains(val.as_str()),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation() {
            None => write!(f, "[{}]", self.name()),
            Some((op, value)) => write!(f, "[{}{op}\"{value}\"]", self.name()),
        }
    }
}

/// Two-character operators are tried before `=`.
fn parse_operator(text: &str) -> Option<(AttrOperator, usize)> {
    [2, 1].into_iter().find_map(|len| {
        text.get(..len)
            .and_then(|token| token.parse::<AttrOperator>().ok())
            .map(|op| (op, len))
    })
}

/// Returns the value and the length consumed, quotes included.
fn parse_value(text: &str) -> Option<(&str, usize)> {
    match text.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &text[1..];
            let end = inner.find(quote)?;
            Some((&inner[..end], end + 2))
        }
        _ => {
            let end = text.find([']', '"', '\'']).unwrap_or(text.len());
            Some((text[..end].trim_end(), end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_presence() {
        assert_eq!(
            AttributeSelector::parse("[href]a"),
            Some((6, AttributeSelector::Exists("href".into())))
        );
        assert_eq!(
            AttributeSelector::parse("[data-x ]"),
            Some((9, AttributeSelector::Exists("data-x".into())))
        );
    }

    #[test]
    fn test_parse_operators() {
        for (text, op) in [
            ("[a=v]", AttrOperator::Equals),
            ("[a~=v]", AttrOperator::Includes),
            ("[a|=v]", AttrOperator::DashMatch),
            ("[a^=v]", AttrOperator::Prefix),
            ("[a$=v]", AttrOperator::Suffix),
            ("[a*=v]", AttrOperator::Substring),
        ] {
            let (consumed, selector) = AttributeSelector::parse(text).unwrap();
            assert_eq!(consumed, text.len(), "{text}");
            assert_eq!(selector.operation(), Some((op, "v")), "{text}");
        }
    }

    #[test]
    fn test_parse_quoted_values() {
        let (_, selector) = AttributeSelector::parse(r#"[title="a ] b"]"#).unwrap();
        assert_eq!(selector, AttributeSelector::Equals("title".into(), "a ] b".into()));

        let (_, selector) = AttributeSelector::parse("[title = 'x' ]").unwrap();
        assert_eq!(selector, AttributeSelector::Equals("title".into(), "x".into()));

        let (_, selector) = AttributeSelector::parse("[title=]").unwrap();
        assert_eq!(selector, AttributeSelector::Equals("title".into(), String::new()));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(AttributeSelector::parse("[]"), None);
        assert_eq!(AttributeSelector::parse("[a"), None);
        assert_eq!(AttributeSelector::parse("[a=\"v]"), None);
        assert_eq!(AttributeSelector::parse("[a v]"), None);
        assert_eq!(AttributeSelector::parse("[a!=v]"), None);
        assert_eq!(AttributeSelector::parse("a=v]"), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let selector = AttributeSelector::PrefixMatch("href".into(), "http".into());
        assert_eq!(selector.to_string(), "[href^=\"http\"]");
        let text = selector.to_string();
        assert_eq!(AttributeSelector::parse(&text), Some((text.len(), selector)));
    }
}
