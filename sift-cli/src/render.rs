//! Text and JSON rendering of trees and matched elements.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use serde::Serialize;
use sift_dom::{AttrValue, DomTree, ElementData, NodeId, NodeType};

/// One matched element, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct MatchRecord<'a> {
    /// Tag name of the element.
    pub tag: &'a str,
    /// Attributes, keyed by name.
    pub attrs: BTreeMap<&'a str, &'a AttrValue>,
    /// A child-combinator selector that reaches exactly this element.
    pub path: String,
}

impl<'a> MatchRecord<'a> {
    /// Describe `id`, or `None` if it is not an element.
    pub fn new(tree: &'a DomTree, id: NodeId) -> Option<Self> {
        let element = tree.as_element(id)?;
        Some(Self {
            tag: &element.tag_name,
            attrs: element
                .attrs
                .iter()
                .map(|(name, value)| (name.as_str(), value))
                .collect(),
            path: element_path(tree, id),
        })
    }
}

/// Build `> :nth-child(i) > :nth-child(j) ...` from the document down to `id`.
///
/// Evaluated from the document node, the path selects `id` and nothing else.
/// Tag names are left out: positions alone identify the element, and a tag
/// name from the input need not be readable as a type selector.
pub fn element_path(tree: &DomTree, id: NodeId) -> String {
    let mut segments = Vec::new();
    let mut current = Some(id);
    while let Some(node) = current {
        if tree.as_element(node).is_none() {
            break;
        }
        let parent = tree.parent(node);
        let position = parent
            .and_then(|p| tree.element_children(p).position(|child| child == node))
            .map_or(1, |index| index + 1);
        segments.push(format!(":nth-child({position})"));
        current = parent;
    }
    segments.reverse();
    format!("> {}", segments.join(" > "))
}

/// Render an element's opening tag, optionally with terminal colours.
///
/// `"` inside attribute values is written as `&quot;`.
pub fn opening_tag(element: &ElementData, color: bool) -> String {
    let mut out = String::from("<");
    if color {
        let _ = write!(out, "{}", element.tag_name.cyan());
    } else {
        out.push_str(&element.tag_name);
    }
    for (name, value) in &element.attrs {
        let value = value.joined().replace('"', "&quot;");
        let _ = match (color, value.is_empty()) {
            (true, true) => write!(out, " {}", name.yellow()),
            (true, false) => write!(out, " {}=\"{}\"", name.yellow(), value.green()),
            (false, true) => write!(out, " {name}"),
            (false, false) => write!(out, " {name}=\"{value}\""),
        };
    }
    out.push('>');
    out
}

/// Render the subtree at `id` as an indented outline.
pub fn outline(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_outline(tree, id, 0, &mut out);
    out
}

fn write_outline(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    let _ = match &node.node_type {
        NodeType::Document => writeln!(out, "{prefix}Document"),
        NodeType::Element(data) => writeln!(out, "{prefix}{}", opening_tag(data, false)),
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}<!-- {data} -->"),
    };
    for &child in tree.children(id) {
        write_outline(tree, child, indent + 1, out);
    }
}
