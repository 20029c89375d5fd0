//! Matcher primitives.
//!
//! [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
//!
//! Each primitive kind knows how to consume its syntax from the front of the
//! remaining selector text ([`MatcherKind::build`]) and how to pick its
//! matches out of a candidate scope ([`SimpleSelector::matches`]). A scope is
//! an ordered slice of sibling elements; matches are returned as a set of
//! node ids so compound selectors can intersect them.

mod attribute;
mod sibling;
mod structural;

use std::collections::HashSet;
use std::fmt;

use sift_dom::{DomTree, ElementData, NodeId};
use strum_macros::Display;

pub use attribute::{AttrOperator, AttributeSelector};
pub use sibling::SiblingSelector;
pub use structural::{Position, StructuralPseudo};

use crate::compound::CompoundSelector;
use crate::error::SelectorError;
use crate::scanner::{ident_len, name_len};

/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    /// "A type selector is the name of a document language element type,
    /// and represents an instance of that element type in the document tree."
    ///
    /// Names compare case-sensitively.
    ///
    /// Examples: `div`, `p`, `span`, `body`, `h1`
    Type(String),

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// Examples: `[href]`, `[type=text]`, `[class~=active]`, `[lang|=en]`
    Attribute(AttributeSelector),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    ///
    /// Examples: `#main`, `#header`, `#nav-bar`
    Id(String),

    /// `:first-child`, `:last-child`, `:nth-child(n)`, `:nth-last-child(n)`
    ///
    /// Position among all elements of the scope.
    ChildPosition(Position),

    /// `:first-of-type`, `:last-of-type`, `:nth-of-type(n)`, `:nth-last-of-type(n)`
    ///
    /// Position among the scope elements sharing the candidate's name.
    TypePosition(Position),

    /// `A + B` or `A ~ B`, see [`SiblingSelector`].
    Sibling(SiblingSelector),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.highlight`, `.btn`, `.nav-item`
    Class(String),
}

impl SimpleSelector {
    /// The subset of `scope` this selector matches.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, scope: &[NodeId]) -> HashSet<NodeId> {
        match self {
            Self::Type(name) => filter_scope(tree, scope, |e| e.tag_name == *name),
            Self::Attribute(attr_sel) => filter_scope(tree, scope, |e| attr_sel.matches(e)),
            Self::Id(id) => filter_scope(tree, scope, |e| {
                e.attribute("id").is_some_and(|v| v.joined() == id.as_str())
            }),
            Self::Class(class_name) => filter_scope(tree, scope, |e| {
                e.attribute("class")
                    .is_some_and(|v| v.contains_token(class_name))
            }),
            Self::ChildPosition(position) => structural::matches_child(scope, *position),
            Self::TypePosition(position) => structural::matches_of_type(tree, scope, *position),
            Self::Sibling(sibling) => sibling.matches(tree, scope),
        }
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => f.write_str(name),
            Self::Attribute(attr_sel) => write!(f, "{attr_sel}"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Class(class_name) => write!(f, ".{class_name}"),
            Self::ChildPosition(position) => position.write_pseudo(f, false),
            Self::TypePosition(position) => position.write_pseudo(f, true),
            Self::Sibling(sibling) => write!(f, "{sibling}"),
        }
    }
}

/// Elements of `scope` whose element data satisfies `pred`.
fn filter_scope(
    tree: &DomTree,
    scope: &[NodeId],
    pred: impl Fn(&ElementData) -> bool,
) -> HashSet<NodeId> {
    scope
        .iter()
        .copied()
        .filter(|&id| tree.as_element(id).is_some_and(&pred))
        .collect()
}

/// The closed set of primitive kinds, one per [`SimpleSelector`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MatcherKind {
    /// [`SimpleSelector::Type`]
    Type,
    /// [`SimpleSelector::Attribute`]
    Attribute,
    /// [`SimpleSelector::Id`]
    Id,
    /// [`SimpleSelector::ChildPosition`]
    ChildPosition,
    /// [`SimpleSelector::TypePosition`]
    TypePosition,
    /// [`SimpleSelector::Sibling`]
    Sibling,
    /// [`SimpleSelector::Class`]
    Class,
}

impl MatcherKind {
    /// The order in which kinds are offered the remaining selector text.
    pub const PRIORITY: [Self; 7] = [
        Self::Type,
        Self::Attribute,
        Self::Id,
        Self::ChildPosition,
        Self::TypePosition,
        Self::Sibling,
        Self::Class,
    ];

    /// Try to consume one selector of this kind from the front of `text`,
    /// appending it to `compound`.
    ///
    /// Returns the number of bytes consumed; 0 means the text does not start
    /// with this kind and `compound` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] when the text starts with this kind but is
    /// malformed (a bad `nth` argument, a sibling combinator missing an
    /// operand).
    pub fn build(self, text: &str, compound: &mut CompoundSelector) -> Result<usize, SelectorError> {
        let parsed = match self {
            Self::Type => {
                let len = name_len(text);
                (len > 0).then(|| (len, SimpleSelector::Type(text[..len].to_string())))
            }
            Self::Attribute => AttributeSelector::parse(text)
                .map(|(len, attr_sel)| (len, SimpleSelector::Attribute(attr_sel))),
            Self::Id => parse_prefixed(text, '#').map(|(len, id)| (len, SimpleSelector::Id(id))),
            Self::ChildPosition => Position::parse(text, false)?
                .map(|(len, position)| (len, SimpleSelector::ChildPosition(position))),
            Self::TypePosition => Position::parse(text, true)?
                .map(|(len, position)| (len, SimpleSelector::TypePosition(position))),
            Self::Sibling => return SiblingSelector::build(text, compound),
            Self::Class => {
                parse_prefixed(text, '.').map(|(len, class)| (len, SimpleSelector::Class(class)))
            }
        };

        Ok(match parsed {
            Some((len, simple)) => {
                compound.simple_selectors.push(simple);
                len
            }
            None => 0,
        })
    }
}

/// `#value` or `.value`: the marker followed by a non-empty identifier.
fn parse_prefixed(text: &str, marker: char) -> Option<(usize, String)> {
    let rest = text.strip_prefix(marker)?;
    let len = ident_len(rest);
    (len > 0).then(|| (1 + len, rest[..len].to_string()))
}
