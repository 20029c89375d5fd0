//! Attribute values.

use std::borrow::Cow;

use serde::Serialize;

/// Attributes whose markup value is a set of space-separated tokens.
///
/// When an element is built from raw attribute text these are stored as
/// [`AttrValue::List`].
pub const MULTI_VALUED_ATTRIBUTES: &[&str] = &[
    "class",
    "rel",
    "rev",
    "headers",
    "accesskey",
    "accept-charset",
    "dropzone",
];

/// Whether `name` is one of the [`MULTI_VALUED_ATTRIBUTES`].
#[must_use]
pub fn is_multi_valued(name: &str) -> bool {
    MULTI_VALUED_ATTRIBUTES.contains(&name)
}

/// The value of one attribute: either a single string or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A plain string value, e.g. `href="/next"`.
    Single(String),
    /// A list value, e.g. `class="nav main"` stored as `["nav", "main"]`.
    List(Vec<String>),
}

impl AttrValue {
    /// Build a value from raw markup text, splitting multi-valued attributes.
    #[must_use]
    pub fn from_raw(name: &str, raw: &str) -> Self {
        if is_multi_valued(name) {
            Self::List(raw.split_ascii_whitespace().map(str::to_owned).collect())
        } else {
            Self::Single(raw.to_owned())
        }
    }

    /// The string form of the value. Lists are joined by a single space.
    #[must_use]
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            Self::Single(value) => Cow::Borrowed(value),
            Self::List(values) => Cow::Owned(values.join(" ")),
        }
    }

    /// The whitespace-separated tokens of the value.
    ///
    /// A single value is split on ASCII whitespace; a list yields its items
    /// as they are.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        let (single, list) = match self {
            Self::Single(value) => (Some(value.split_ascii_whitespace()), None),
            Self::List(values) => (None, Some(values.iter().map(String::as_str))),
        };
        single.into_iter().flatten().chain(list.into_iter().flatten())
    }

    /// Whether `token` is one of [`AttrValue::tokens`].
    #[must_use]
    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens().any(|t| t == token)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_splits_multi_valued() {
        assert_eq!(
            AttrValue::from_raw("class", "  nav   main "),
            AttrValue::List(vec!["nav".into(), "main".into()])
        );
        assert_eq!(
            AttrValue::from_raw("title", "  nav main "),
            AttrValue::Single("  nav main ".into())
        );
    }

    #[test]
    fn test_joined_uses_single_space() {
        let value = AttrValue::List(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(value.joined(), "a b c");
    }

    #[test]
    fn test_tokens_of_single_value() {
        let value = AttrValue::from("en  us\tgb");
        assert_eq!(value.tokens().collect::<Vec<_>>(), ["en", "us", "gb"]);
        assert!(value.contains_token("us"));
        assert!(!value.contains_token("en us"));
    }
}
