//! [§ 16.3](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators) and
//! [§ 16.4](https://www.w3.org/TR/selectors-4/#general-sibling-combinators) sibling combinators.
//!
//! A sibling combinator is parsed as part of a compound selector: everything
//! accumulated before `+`/`~` becomes the left operand, and the right operand
//! is built by running the compound loop again on the text that follows. Both
//! operands are evaluated against the same candidate scope, and the scope's
//! order decides what "following" means.

use std::collections::HashSet;
use std::fmt;

use sift_dom::{DomTree, NodeId};

use crate::compound::CompoundSelector;
use crate::error::{OperandSide, SelectorError};
use crate::matcher::SimpleSelector;
use crate::scanner::whitespace_len;
use crate::select::Combinator;

/// `A + B` or `A ~ B`: matches the `B` elements that follow an `A` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingSelector {
    /// [`Combinator::NextSibling`] or [`Combinator::SubsequentSibling`].
    pub combinator: Combinator,
    /// The compound selector before the combinator.
    pub left: CompoundSelector,
    /// The compound selector after the combinator.
    pub right: CompoundSelector,
}

impl SiblingSelector {
    /// Consume a combinator and its right operand from the front of `text`,
    /// folding the selectors accumulated so far in `compound` into the left
    /// operand.
    ///
    /// Returns the consumed length, 0 when `text` does not start with a
    /// sibling combinator.
    ///
    /// # Errors
    ///
    /// [`SelectorError::MissingOperand`] when either operand is empty, or any
    /// error raised while parsing the right operand.
    pub(crate) fn build(text: &str, compound: &mut CompoundSelector) -> Result<usize, SelectorError> {
        let lead = whitespace_len(text);
        let combinator = match text[lead..].chars().next() {
            Some('+') => Combinator::NextSibling,
            Some('~') => Combinator::SubsequentSibling,
            _ => return Ok(0),
        };
        let mut consumed = lead + 1;
        consumed += whitespace_len(&text[consumed..]);

        let (right, right_len) = CompoundSelector::parse_prefix(&text[consumed..])?;
        if compound.is_empty() {
            return Err(SelectorError::MissingOperand {
                side: OperandSide::Before,
                combinator,
            });
        }
        if right.is_empty() {
            return Err(SelectorError::MissingOperand {
                side: OperandSide::After,
                combinator,
            });
        }

        let left = std::mem::take(compound);
        compound.simple_selectors.push(SimpleSelector::Sibling(Self {
            combinator,
            left,
            right,
        }));
        Ok(consumed + right_len)
    }

    /// The elements of `scope` matched by the right operand that follow,
    /// immediately for `+` or anywhere later for `~`, an element matched by
    /// the left operand.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, scope: &[NodeId]) -> HashSet<NodeId> {
        let left = self.left.matches(tree, scope);
        let right = self.right.matches(tree, scope);

        let mut matched = HashSet::new();
        for (index, id) in scope.iter().enumerate() {
            if !left.contains(id) {
                continue;
            }
            let following = &scope[index + 1..];
            if self.combinator == Combinator::NextSibling {
                matched.extend(following.first().filter(|next| right.contains(*next)));
            } else {
                matched.extend(following.iter().filter(|later| right.contains(*later)));
            }
        }
        matched
    }
}

impl fmt::Display for SiblingSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.combinator, self.right)
    }
}
