//! Selector lists and tree traversal.
//!
//! [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
//!
//! Matching runs left to right. Every chain starts from the root; each step
//! gathers candidate scopes below the elements the previous step matched,
//! one scope per parent, and keeps the candidates its compound selector
//! matches within that scope.

use std::collections::{HashMap, HashSet};

use sift_dom::{DomTree, NodeId};
use strum_macros::Display;

use crate::compound::CompoundSelector;
use crate::error::SelectorError;

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
///
/// Chains link their steps with [`Combinator::Descendant`] or
/// [`Combinator::Child`]; the sibling combinators live inside compound
/// selectors as [`crate::SiblingSelector`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    #[strum(serialize = " ")]
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    #[strum(serialize = ">")]
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// "A selector of the form 'A + B' represents an element B that
    /// immediately follows element A, where A and B share the same parent."
    #[strum(serialize = "+")]
    NextSibling,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// "A selector of the form 'A ~ B' represents an element B that
    /// follows element A (not necessarily immediately), where A and B share the
    /// same parent."
    #[strum(serialize = "~")]
    SubsequentSibling,
}

/// One step of a chain: how to reach the candidates, and what they must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// [`Combinator::Descendant`] or [`Combinator::Child`], relative to the
    /// previous step's matches (or the root, for the first step).
    pub combinator: Combinator,
    /// The compound selector candidates must match.
    pub compound: CompoundSelector,
}

impl Step {
    /// Evaluate this step below every element of `scope`.
    fn apply(&self, tree: &DomTree, scope: &[NodeId]) -> Vec<NodeId> {
        let groups = candidate_groups(tree, scope, self.combinator);
        let matched: Vec<NodeId> = groups
            .iter()
            .flat_map(|group| self.compound.filter(tree, group))
            .collect();
        tracing::debug!(
            step = %self.compound,
            combinator = ?self.combinator,
            groups = groups.len(),
            found = matched.len(),
            "evaluated selector step"
        );
        matched
    }
}

/// A left-to-right sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorChain {
    /// The steps, in the order they are written.
    pub steps: Vec<Step>,
}

impl SelectorChain {
    /// The elements this chain selects below `root`.
    ///
    /// A chain with no steps selects nothing.
    #[must_use]
    pub fn select(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        if self.steps.is_empty() {
            return Vec::new();
        }
        let mut scope = vec![root];
        for step in &self.steps {
            scope = step.apply(tree, &scope);
            if scope.is_empty() {
                break;
            }
        }
        scope
    }
}

/// A comma-separated list of chains.
///
/// The result of a list is the concatenation of its chains' results, in the
/// order written. An element matched by two chains appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList {
    /// The chains, in the order they are written.
    pub chains: Vec<SelectorChain>,
}

impl SelectorList {
    /// Parse a selector list.
    ///
    /// Surrounding whitespace is ignored. The empty string parses to an empty
    /// list, which selects nothing.
    ///
    /// # Errors
    ///
    /// Returns the first [`SelectorError`] met while scanning.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let mut chains = Vec::new();
        let mut steps = Vec::new();
        let mut rest = text.trim();

        while !rest.is_empty() {
            let combinator = match rest.strip_prefix('>') {
                Some(after) => {
                    rest = after.trim_start();
                    Combinator::Child
                }
                None => Combinator::Descendant,
            };

            let (compound, remaining) = CompoundSelector::parse(rest)?;
            tracing::trace!(%compound, ?combinator, "parsed selector step");
            steps.push(Step {
                combinator,
                compound,
            });

            rest = remaining.trim();
            if let Some(after) = rest.strip_prefix(',') {
                chains.push(SelectorChain {
                    steps: std::mem::take(&mut steps),
                });
                rest = after.trim();
            }
        }

        if !steps.is_empty() {
            chains.push(SelectorChain { steps });
        }
        Ok(Self { chains })
    }

    /// The elements this list selects below `root`.
    #[must_use]
    pub fn select(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        self.chains
            .iter()
            .flat_map(|chain| chain.select(tree, root))
            .collect()
    }
}

/// Select the elements below `root` matching the selector list `selector`.
///
/// Within one chain an element is returned at most once, even when several
/// matched ancestors reach it; across a comma list results are concatenated,
/// so an element matched by two chains appears twice.
///
/// # Errors
///
/// Returns a [`SelectorError`] for malformed selectors; no partial results
/// are produced.
///
/// # Example
///
/// ```
/// use sift_dom::{DomTree, ElementData, NodeId};
///
/// let mut tree = DomTree::new();
/// let ul = tree.append_element(NodeId::ROOT, ElementData::new("ul"));
/// let li = tree.append_element(ul, ElementData::new("li").with_attribute("class", "on"));
///
/// let found = sift_select::select(&tree, NodeId::ROOT, "ul > li.on").unwrap();
/// assert_eq!(found, vec![li]);
/// ```
pub fn select(tree: &DomTree, root: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
    Ok(SelectorList::parse(selector)?.select(tree, root))
}

/// Build the candidate scopes for one step.
///
/// For a child step, each scope element's element children form one group.
/// For a descendant step, the element descendants of every scope element are
/// partitioned by parent; groups are ordered by the first appearance of their
/// parent, and an element reachable from two scope elements (one nested in the
/// other) is taken once.
fn candidate_groups(tree: &DomTree, scope: &[NodeId], combinator: Combinator) -> Vec<Vec<NodeId>> {
    if combinator == Combinator::Child {
        return scope
            .iter()
            .map(|&id| tree.element_children(id).collect())
            .collect();
    }

    let mut groups: Vec<Vec<NodeId>> = Vec::new();
    let mut group_of: HashMap<Option<NodeId>, usize> = HashMap::new();
    let mut seen = HashSet::new();
    for &id in scope {
        for node in tree.descendants(id) {
            if tree.as_element(node).is_none() || !seen.insert(node) {
                continue;
            }
            let slot = *group_of.entry(tree.parent(node)).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(node);
        }
    }
    groups
}
