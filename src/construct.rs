//! Placement and removal of nodes.
//!
//! These are the consumers of [`FragmentParser`](crate::FragmentParser)
//! output. Inserting a document fragment inserts its children, in order, and
//! leaves the fragment empty.

use crate::document::Document;
use crate::error::{Error, Result};
use kuchiki::{NodeData, NodeRef};

/// Where to put a node relative to a reference node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Position {
    Before,
    After,
    /// As the first child of the reference.
    First,
    /// As the last child of the reference.
    Last,
    /// In place of the reference, which gets detached.
    Replace,
    /// As the only child of the reference.
    Only,
    /// As the child at the given index of the reference. Negative indices
    /// count from the end.
    Index(isize),
}

impl Default for Position {
    fn default() -> Self {
        Position::Last
    }
}

pub fn place(node: &NodeRef, reference: &NodeRef, position: Position) -> Result<()> {
    match position {
        Position::Before => insert_before(node, reference),
        Position::After => insert_after(node, reference),
        Position::First => insert_first(node, reference),
        Position::Last => insert_last(node, reference),
        Position::Replace => replace(node, reference),
        Position::Only => replace_all(node, reference),
        Position::Index(index) => insert_at_index(node, index, reference),
    }
}

/// Creates an element in `document` and optionally places it.
pub fn create<D>(
    document: &D,
    tag: &str,
    placement: Option<(&NodeRef, Position)>,
) -> Result<NodeRef>
where
    D: Document + ?Sized,
{
    let element = document.create_element(tag);
    if let Some((reference, position)) = placement {
        place(&element, reference, position)?;
    }
    Ok(element)
}

pub fn insert_at_index(node: &NodeRef, index: isize, parent: &NodeRef) -> Result<()> {
    let len = parent.children().count();
    let index = if index < 0 {
        let from_end = index.unsigned_abs();
        if from_end >= len {
            0
        } else {
            len - from_end
        }
    } else {
        index as usize
    };
    insert_into(parent, node, parent.children().nth(index))
}

pub fn insert_before(node: &NodeRef, reference: &NodeRef) -> Result<()> {
    let parent = reference.parent().ok_or(Error::Detached)?;
    insert_into(&parent, node, Some(reference.clone()))
}

pub fn insert_after(node: &NodeRef, reference: &NodeRef) -> Result<()> {
    let parent = reference.parent().ok_or(Error::Detached)?;
    insert_into(&parent, node, reference.next_sibling())
}

pub fn insert_first(node: &NodeRef, parent: &NodeRef) -> Result<()> {
    insert_into(parent, node, parent.first_child())
}

pub fn insert_last(node: &NodeRef, parent: &NodeRef) -> Result<()> {
    insert_into(parent, node, None)
}

/// Puts `node` where `reference` is, and detaches `reference`.
pub fn replace(node: &NodeRef, reference: &NodeRef) -> Result<()> {
    if node == reference {
        return Ok(());
    }
    insert_before(node, reference)?;
    reference.detach();
    Ok(())
}

/// Empties `parent` and then appends `node` to it.
pub fn replace_all(node: &NodeRef, parent: &NodeRef) -> Result<()> {
    check_hierarchy(node, parent)?;
    // Don't tear down `node` if it's already one of the children.
    node.detach();
    empty(parent);
    insert_last(node, parent)
}

/// Removes all the children of `node`.
pub fn empty(node: &NodeRef) {
    // Children go last to first, and depth first, so that table parts are
    // torn down before the rows and sections containing them.
    while let Some(child) = node.last_child() {
        destroy(&child);
    }
}

/// Removes `node` and its whole subtree from the tree it lives in.
pub fn destroy(node: &NodeRef) {
    if node.first_child().is_some() {
        empty(node);
    }
    node.detach();
}

fn is_fragment(node: &NodeRef) -> bool {
    match *node.data() {
        NodeData::DocumentFragment => true,
        _ => false,
    }
}

fn check_hierarchy(node: &NodeRef, parent: &NodeRef) -> Result<()> {
    if parent.inclusive_ancestors().any(|ancestor| ancestor == *node) {
        return Err(Error::HierarchyRequest);
    }
    Ok(())
}

fn insert_into(parent: &NodeRef, node: &NodeRef, mut before: Option<NodeRef>) -> Result<()> {
    check_hierarchy(node, parent)?;

    let nodes: Vec<NodeRef> = if is_fragment(node) {
        node.children().collect()
    } else {
        vec![node.clone()]
    };

    // Inserting a node before itself is a no-op, but kuchiki would detach the
    // anchor first, so skip past any node that is about to move.
    while let Some(anchor) = before.clone() {
        if !nodes.contains(&anchor) {
            break;
        }
        before = anchor.next_sibling();
    }

    for child in nodes {
        match before {
            Some(ref anchor) => anchor.insert_before(child),
            None => parent.append(child),
        }
    }
    Ok(())
}
