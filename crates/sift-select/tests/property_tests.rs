//! Property tests for selection over randomly shaped trees.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sift_dom::{DomTree, ElementData, NodeId};
use sift_select::select;

const TAGS: [&str; 4] = ["div", "p", "a", "li"];
const CLASSES: [&str; 3] = ["x", "y", "x y"];
const SELECTORS: [&str; 8] = [
    "p",
    ".x",
    "div > p",
    "div a",
    "li:first-child",
    "p ~ a",
    "[class~=y]",
    "a:nth-of-type(2)",
];

/// A tree described by, for each new element, the index of an earlier node
/// to attach to (0 is the document) and a tag/class choice.
#[derive(Debug, Clone)]
struct RandomTree {
    shape: Vec<(usize, usize, usize)>,
}

impl Arbitrary for RandomTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 40;
        let shape = (0..len)
            .map(|i| {
                (
                    usize::arbitrary(g) % (i + 1),
                    usize::arbitrary(g) % TAGS.len(),
                    usize::arbitrary(g) % CLASSES.len(),
                )
            })
            .collect();
        Self { shape }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // Dropping trailing elements keeps every parent index valid
        let shape = self.shape.clone();
        Box::new((0..shape.len()).rev().map(move |len| Self {
            shape: shape[..len].to_vec(),
        }))
    }
}

impl RandomTree {
    fn build(&self) -> DomTree {
        let mut tree = DomTree::new();
        let mut nodes = vec![NodeId::ROOT];
        for &(parent, tag, class) in &self.shape {
            let element = ElementData::new(TAGS[tag]).with_attribute("class", CLASSES[class]);
            let id = tree.append_element(nodes[parent], element);
            nodes.push(id);
        }
        tree
    }
}

#[derive(Debug, Clone, Copy)]
struct SelectorPick(usize);

impl Arbitrary for SelectorPick {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(usize::arbitrary(g) % SELECTORS.len())
    }
}

impl SelectorPick {
    const fn text(self) -> &'static str {
        SELECTORS[self.0]
    }
}

/// Elements named `name` below the root, in document order.
fn named_descendants(tree: &DomTree, name: &str) -> Vec<NodeId> {
    tree.descendants(NodeId::ROOT)
        .filter(|&id| tree.tag_name(id) == Some(name))
        .collect()
}

#[quickcheck]
fn prop_type_selector_finds_exactly_named_descendants(tree: RandomTree) -> bool {
    let tree = tree.build();
    TAGS.iter().all(|&name| {
        let found = select(&tree, NodeId::ROOT, name).unwrap();
        let expected = named_descendants(&tree, name);

        let mut sorted_found = found.clone();
        sorted_found.sort_unstable();
        let mut sorted_expected = expected.clone();
        sorted_expected.sort_unstable();

        // Same elements, and siblings keep document order
        sorted_found == sorted_expected
            && found.iter().all(|&id| {
                let parent = tree.parent(id);
                let ours = found.iter().filter(|&&n| tree.parent(n) == parent);
                let theirs = expected.iter().filter(|&&n| tree.parent(n) == parent);
                ours.eq(theirs)
            })
    })
}

#[quickcheck]
fn prop_child_step_only_returns_root_children(tree: RandomTree) -> bool {
    let tree = tree.build();
    TAGS.iter().all(|&name| {
        let found = select(&tree, NodeId::ROOT, &format!("> {name}")).unwrap();
        let expected: Vec<_> = tree
            .element_children(NodeId::ROOT)
            .filter(|&id| tree.tag_name(id) == Some(name))
            .collect();
        found == expected
    })
}

#[quickcheck]
fn prop_first_child_is_first_element_child(tree: RandomTree) -> bool {
    let tree = tree.build();
    select(&tree, NodeId::ROOT, ":first-child")
        .unwrap()
        .into_iter()
        .all(|id| {
            tree.parent(id)
                .and_then(|parent| tree.element_children(parent).next())
                == Some(id)
        })
}

#[quickcheck]
fn prop_select_is_pure(tree: RandomTree, pick: SelectorPick) -> bool {
    let tree = tree.build();
    let first = select(&tree, NodeId::ROOT, pick.text()).unwrap();
    let second = select(&tree, NodeId::ROOT, pick.text()).unwrap();
    first == second
}

#[quickcheck]
fn prop_selector_list_is_concatenation(tree: RandomTree, a: SelectorPick, b: SelectorPick) -> bool {
    let tree = tree.build();
    let combined = select(&tree, NodeId::ROOT, &format!("{}, {}", a.text(), b.text())).unwrap();
    let mut expected = select(&tree, NodeId::ROOT, a.text()).unwrap();
    expected.extend(select(&tree, NodeId::ROOT, b.text()).unwrap());
    combined == expected
}

#[quickcheck]
fn prop_results_within_one_chain_are_unique(tree: RandomTree, pick: SelectorPick) -> bool {
    let tree = tree.build();
    let mut found = select(&tree, NodeId::ROOT, pick.text()).unwrap();
    let len = found.len();
    found.sort_unstable();
    found.dedup();
    found.len() == len
}
