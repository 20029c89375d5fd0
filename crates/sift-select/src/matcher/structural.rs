//! [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
//!
//! Positions are computed within the candidate scope handed to the matcher,
//! not by walking the tree. The driver builds scopes from one parent's element
//! children, so within the driver this coincides with sibling position.
//!
//! Only literal integer arguments are accepted; there is no `an+b` form.

use std::collections::{HashMap, HashSet};
use std::fmt;

use sift_dom::{DomTree, NodeId};
use strum_macros::{Display, EnumString};

use crate::error::SelectorError;
use crate::scanner::ident_len;

/// The structural pseudo-classes understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum StructuralPseudo {
    /// `:first-child`
    #[strum(serialize = "first-child")]
    FirstChild,
    /// `:last-child`
    #[strum(serialize = "last-child")]
    LastChild,
    /// `:nth-child(n)`
    #[strum(serialize = "nth-child")]
    NthChild,
    /// `:nth-last-child(n)`
    #[strum(serialize = "nth-last-child")]
    NthLastChild,
    /// `:first-of-type`
    #[strum(serialize = "first-of-type")]
    FirstOfType,
    /// `:last-of-type`
    #[strum(serialize = "last-of-type")]
    LastOfType,
    /// `:nth-of-type(n)`
    #[strum(serialize = "nth-of-type")]
    NthOfType,
    /// `:nth-last-of-type(n)`
    #[strum(serialize = "nth-last-of-type")]
    NthLastOfType,
}

impl StructuralPseudo {
    /// Whether positions count only elements sharing the candidate's name.
    #[must_use]
    pub const fn counts_by_type(self) -> bool {
        matches!(
            self,
            Self::FirstOfType | Self::LastOfType | Self::NthOfType | Self::NthLastOfType
        )
    }

    /// Whether the pseudo-class takes a parenthesised argument.
    #[must_use]
    pub const fn takes_argument(self) -> bool {
        matches!(
            self,
            Self::NthChild | Self::NthLastChild | Self::NthOfType | Self::NthLastOfType
        )
    }

    /// Build the pseudo-class for a position, `by_type` selecting the family.
    #[must_use]
    pub const fn for_position(position: Position, by_type: bool) -> Self {
        match (position, by_type) {
            (Position::First, false) => Self::FirstChild,
            (Position::Last, false) => Self::LastChild,
            (Position::FromStart(_), false) => Self::NthChild,
            (Position::FromEnd(_), false) => Self::NthLastChild,
            (Position::First, true) => Self::FirstOfType,
            (Position::Last, true) => Self::LastOfType,
            (Position::FromStart(_), true) => Self::NthOfType,
            (Position::FromEnd(_), true) => Self::NthLastOfType,
        }
    }
}

/// A position within a sequence of siblings. `n` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Index 0.
    First,
    /// Index `count - 1`.
    Last,
    /// Index `n - 1`.
    FromStart(usize),
    /// Index `count - n`.
    FromEnd(usize),
}

impl Position {
    /// The zero-based index this position designates in a sequence of
    /// `count` elements, or `None` when out of range.
    #[must_use]
    pub fn index(self, count: usize) -> Option<usize> {
        let index = match self {
            Self::First => 0,
            Self::Last => count.checked_sub(1)?,
            Self::FromStart(n) => n.checked_sub(1)?,
            Self::FromEnd(n) => count.checked_sub(n)?,
        };
        (index < count).then_some(index)
    }

    /// Consume a structural pseudo-class of the requested family from the
    /// front of `text`.
    ///
    /// Returns `Ok(None)` when `text` does not start with such a pseudo-class.
    ///
    /// # Errors
    ///
    /// [`SelectorError::InvalidNth`] when an `nth-*` argument is missing or is
    /// not a positive integer.
    pub(crate) fn parse(text: &str, by_type: bool) -> Result<Option<(usize, Self)>, SelectorError> {
        let Some(rest) = text.strip_prefix(':') else {
            return Ok(None);
        };
        let name_len = ident_len(rest);
        let Ok(pseudo) = rest[..name_len].parse::<StructuralPseudo>() else {
            return Ok(None);
        };
        if pseudo.counts_by_type() != by_type {
            return Ok(None);
        }

        let consumed = 1 + name_len;
        let from_start = matches!(
            pseudo,
            StructuralPseudo::FirstChild
                | StructuralPseudo::FirstOfType
                | StructuralPseudo::NthChild
                | StructuralPseudo::NthOfType
        );
        if !pseudo.takes_argument() {
            let position = if from_start { Self::First } else { Self::Last };
            return Ok(Some((consumed, position)));
        }

        let (arg_len, n) = parse_argument(&rest[name_len..])?;
        let position = if from_start {
            Self::FromStart(n)
        } else {
            Self::FromEnd(n)
        };
        Ok(Some((consumed + arg_len, position)))
    }

    /// Write this position as its pseudo-class, e.g. `:nth-of-type(2)`.
    pub(crate) fn write_pseudo(self, f: &mut fmt::Formatter<'_>, by_type: bool) -> fmt::Result {
        let pseudo = StructuralPseudo::for_position(self, by_type);
        match self {
            Self::FromStart(n) | Self::FromEnd(n) => write!(f, ":{pseudo}({n})"),
            Self::First | Self::Last => write!(f, ":{pseudo}"),
        }
    }
}

/// Parse `(n)` with a positive integer `n`, returning the consumed length.
fn parse_argument(text: &str) -> Result<(usize, usize), SelectorError> {
    let invalid = |value: &str| SelectorError::InvalidNth {
        value: value.trim().to_string(),
    };
    let Some(inner) = text.strip_prefix('(') else {
        return Err(invalid(""));
    };
    let Some(close) = inner.find(')') else {
        return Err(invalid(inner));
    };
    let raw = &inner[..close];
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok((close + 2, n)),
        _ => Err(invalid(raw)),
    }
}

/// Elements of `scope` at `position`, counting all of them.
pub(crate) fn matches_child(scope: &[NodeId], position: Position) -> HashSet<NodeId> {
    position
        .index(scope.len())
        .map(|index| scope[index])
        .into_iter()
        .collect()
}

/// Elements of `scope` at `position` among the scope elements sharing their
/// name.
pub(crate) fn matches_of_type(
    tree: &DomTree,
    scope: &[NodeId],
    position: Position,
) -> HashSet<NodeId> {
    let mut by_name: HashMap<&str, Vec<NodeId>> = HashMap::new();
    for &id in scope {
        if let Some(name) = tree.tag_name(id) {
            by_name.entry(name).or_default().push(id);
        }
    }
    by_name
        .values()
        .filter_map(|group| position.index(group.len()).map(|index| group[index]))
        .collect()
}
