//! Loading a tree from a JSON document description.
//!
//! The format mirrors the tree itself:
//!
//! ```json
//! { "tag": "ul", "attrs": { "class": "nav main", "rel": ["a", "b"] },
//!   "children": [ { "tag": "li" }, "some text", { "comment": "note" } ] }
//! ```
//!
//! A top-level array loads several sibling elements under the document node.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

use crate::{AttrValue, DomTree, ElementData, NodeId, NodeType};

/// Errors raised while loading a tree description.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The input is not valid JSON or does not follow the node shape.
    #[error("invalid tree description: {0}")]
    Json(#[from] serde_json::Error),
}

/// One node of a tree description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NodeSource {
    /// An element with optional attributes and children.
    Element {
        /// Element name.
        tag: String,
        /// Attribute values, raw strings or explicit lists.
        #[serde(default)]
        attrs: BTreeMap<String, AttrSource>,
        /// Child nodes in document order.
        #[serde(default)]
        children: Vec<NodeSource>,
    },
    /// A comment node.
    Comment {
        /// Comment text.
        comment: String,
    },
    /// A text node.
    Text(String),
}

/// An attribute value as written in a tree description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttrSource {
    /// Raw attribute text; multi-valued attributes are split on whitespace.
    Raw(String),
    /// An explicit list, stored as given.
    List(Vec<String>),
}

impl AttrSource {
    fn to_value(&self, name: &str) -> AttrValue {
        match self {
            Self::Raw(raw) => AttrValue::from_raw(name, raw),
            Self::List(values) => AttrValue::List(values.clone()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Many(Vec<NodeSource>),
    One(NodeSource),
}

impl NodeSource {
    /// Append this node, and everything below it, under `parent`.
    pub fn build_into(&self, tree: &mut DomTree, parent: NodeId) -> NodeId {
        match self {
            Self::Element {
                tag,
                attrs,
                children,
            } => {
                let mut element = ElementData::new(tag.as_str());
                for (name, value) in attrs {
                    element.set_attribute(name, value.to_value(name));
                }
                let id = tree.append_element(parent, element);
                for child in children {
                    let _ = child.build_into(tree, id);
                }
                id
            }
            Self::Comment { comment } => {
                let id = tree.alloc(NodeType::Comment(comment.clone()));
                tree.append_child(parent, id);
                id
            }
            Self::Text(text) => tree.append_text(parent, text.as_str()),
        }
    }
}

impl DomTree {
    /// Parse a JSON tree description into a new tree.
    ///
    /// The described nodes become children of the document node.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] if the text is not a valid description.
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        Ok(Self::from_document(serde_json::from_str(text)?))
    }

    /// Read a JSON tree description from `reader` into a new tree.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] on I/O failure or an invalid description.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        Ok(Self::from_document(serde_json::from_reader(reader)?))
    }

    fn from_document(document: Document) -> Self {
        let mut tree = Self::new();
        let nodes = match document {
            Document::Many(nodes) => nodes,
            Document::One(node) => vec![node],
        };
        for node in &nodes {
            let _ = node.build_into(&mut tree, NodeId::ROOT);
        }
        tree
    }
}
