//! [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
//!
//! "A compound selector is a sequence of simple selectors that are not
//! separated by a combinator, and represents a set of simultaneous
//! conditions on a single element."

use std::collections::HashSet;
use std::fmt;

use sift_dom::{DomTree, NodeId};

use crate::error::SelectorError;
use crate::matcher::{MatcherKind, SimpleSelector};

/// A set of simple selectors that must all match the same element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The list of simple selectors that make up this compound selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// Parse a compound selector from the front of `text`, returning it with
    /// the unparsed remainder.
    ///
    /// Kinds may interleave freely: `div#id.cls[attr=v]:first-child` is one
    /// compound selector. A sibling combinator (`+`, `~`) is absorbed into
    /// the compound as a [`SimpleSelector::Sibling`].
    ///
    /// # Errors
    ///
    /// [`SelectorError::UnknownSelector`] if nothing at the front of `text`
    /// is a selector, or any error raised by a matcher primitive.
    pub fn parse(text: &str) -> Result<(Self, &str), SelectorError> {
        let (compound, consumed) = Self::parse_prefix(text)?;
        if compound.is_empty() {
            return Err(SelectorError::unknown(text));
        }
        Ok((compound, &text[consumed..]))
    }

    /// Offer the text to every kind in priority order, restarting from the
    /// top after each success, until a full pass consumes nothing.
    ///
    /// An empty result is not an error here; callers decide.
    pub(crate) fn parse_prefix(text: &str) -> Result<(Self, usize), SelectorError> {
        let mut compound = Self::default();
        let mut consumed = 0;
        loop {
            let mut progressed = false;
            for kind in MatcherKind::PRIORITY {
                let len = kind.build(&text[consumed..], &mut compound)?;
                if len > 0 {
                    consumed += len;
                    progressed = true;
                    break;
                }
            }
            if !progressed {
                return Ok((compound, consumed));
            }
        }
    }

    /// Number of simple selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.simple_selectors.len()
    }

    /// Whether no simple selector has been parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.simple_selectors.is_empty()
    }

    /// The elements of `scope` matched by every simple selector.
    ///
    /// An empty compound selector matches nothing.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, scope: &[NodeId]) -> HashSet<NodeId> {
        let mut simples = self.simple_selectors.iter();
        let Some(first) = simples.next() else {
            return HashSet::new();
        };
        let mut matched = first.matches(tree, scope);
        for simple in simples {
            if matched.is_empty() {
                break;
            }
            let other = simple.matches(tree, scope);
            matched.retain(|id| other.contains(id));
        }
        matched
    }

    /// Like [`CompoundSelector::matches`], but in scope order.
    #[must_use]
    pub fn filter(&self, tree: &DomTree, scope: &[NodeId]) -> Vec<NodeId> {
        let matched = self.matches(tree, scope);
        scope
            .iter()
            .copied()
            .filter(|id| matched.contains(id))
            .collect()
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for simple in &self.simple_selectors {
            write!(f, "{simple}")?;
        }
        Ok(())
    }
}
