//! CSS selector engine for sift element trees.
//!
//! This crate implements a subset of [Selectors Level 4](https://www.w3.org/TR/selectors-4/)
//! with a hand-written scanner and matcher:
//!
//! - **Matcher primitives** ([`matcher`]) - type, id, class, attribute and
//!   structural selectors, plus the `+`/`~` sibling combinators
//! - **Compound selectors** ([`CompoundSelector`]) - primitives that must all
//!   match the same element, assembled by repeatedly offering the remaining
//!   text to each primitive kind
//! - **Selector driver** ([`select()`], [`SelectorList`]) - descendant and child
//!   steps, comma-separated selector lists, traversal of the tree
//!
//! Not supported: `an+b` expressions, pseudo-elements, namespaces,
//! case-insensitive attribute flags, the universal selector.
//!
//! # Example
//!
//! ```
//! use sift_dom::DomTree;
//!
//! let tree = DomTree::from_json(r#"
//!     { "tag": "ul", "children": [
//!         { "tag": "li", "attrs": { "class": "first" } },
//!         { "tag": "li" } ] }
//! "#).unwrap();
//!
//! let items = sift_select::select(&tree, tree.root(), "ul > li:last-child").unwrap();
//! assert_eq!(items.len(), 1);
//! assert!(sift_select::select(&tree, tree.root(), "li:nth-child(x)").is_err());
//! ```

mod compound;
pub mod error;
pub mod matcher;
mod scanner;
pub mod select;

pub use compound::CompoundSelector;
pub use error::{OperandSide, SelectorError};
pub use matcher::{
    AttrOperator, AttributeSelector, MatcherKind, Position, SiblingSelector, SimpleSelector,
    StructuralPseudo,
};
pub use select::{Combinator, SelectorChain, SelectorList, Step, select};
