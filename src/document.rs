//! The platform side of the crate: something that owns a tree and knows how
//! to create nodes and materialize markup into them.
//!
//! [`HtmlDocument`] is the real thing, backed by html5ever and kuchiki. The
//! [`Document`] trait exists so callers (and tests) can interpose on node
//! creation.

use crate::error::{Error, Result};
use html5ever::{LocalName, QualName};
use kuchiki::traits::*;
use kuchiki::{self, NodeData, NodeRef};
use std::io::{self, Read};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DOCUMENT_ID: AtomicUsize = AtomicUsize::new(1);

/// Identifies a document for the lifetime of the process.
///
/// Clones of a document handle share the id, so they share whatever is keyed
/// off it too.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(usize);

impl DocumentId {
    pub fn next() -> Self {
        DocumentId(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

pub trait Document {
    fn id(&self) -> DocumentId;

    /// The document node itself.
    fn root(&self) -> &NodeRef;

    /// Creates a detached HTML element named `name`.
    fn create_element(&self, name: &str) -> NodeRef;

    fn create_document_fragment(&self) -> NodeRef {
        NodeRef::new(NodeData::DocumentFragment)
    }

    /// Replaces the children of `element` with the result of parsing `markup`
    /// in the context of that element, the way `innerHTML` does.
    fn set_inner_html(&self, element: &NodeRef, markup: &str) -> Result<()>;

    fn get_element_by_id(&self, id: &str) -> Option<NodeRef> {
        self.root().descendants().find(|node| {
            node.as_element().map_or(false, |element| {
                element.attributes.borrow().get(local_name!("id")) == Some(id)
            })
        })
    }
}

/// An HTML document parsed with html5ever.
///
/// This is a cheap handle: clones refer to the same tree and have the same
/// [`DocumentId`].
#[derive(Clone, Debug)]
pub struct HtmlDocument {
    id: DocumentId,
    root: NodeRef,
}

impl HtmlDocument {
    /// An empty document, with the `<html>`, `<head>` and `<body>` elements
    /// the parser always synthesizes.
    pub fn new() -> Self {
        Self::parse("")
    }

    pub fn parse(html: &str) -> Self {
        Self::from_root(kuchiki::parse_html().one(html))
    }

    /// Parses a DOM tree using html5ever out of a UTF-8 stream.
    pub fn from_reader<R>(input: &mut R) -> io::Result<Self>
    where
        R: Read,
    {
        kuchiki::parse_html()
            .from_utf8()
            .read_from(input)
            .map(Self::from_root)
    }

    fn from_root(root: NodeRef) -> Self {
        debug_assert!(root.as_document().is_some());
        Self {
            id: DocumentId::next(),
            root,
        }
    }

    pub fn body(&self) -> Option<NodeRef> {
        self.root.descendants().find(|node| {
            node.as_element()
                .map_or(false, |element| element.name.local == local_name!("body"))
        })
    }
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for HtmlDocument {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn root(&self) -> &NodeRef {
        &self.root
    }

    fn create_element(&self, name: &str) -> NodeRef {
        let name = QualName::new(
            None,
            ns!(html),
            LocalName::from(name.to_ascii_lowercase()),
        );
        NodeRef::new_element(name, None)
    }

    fn set_inner_html(&self, element: &NodeRef, markup: &str) -> Result<()> {
        let context = match element.as_element() {
            Some(element) => element.name.clone(),
            None => return Err(Error::NotAnElement),
        };

        while let Some(child) = element.first_child() {
            child.detach();
        }

        // html5ever hangs the fragment off a synthetic <html> root.
        let parsed = kuchiki::parse_fragment(context, vec![]).one(markup);
        let root = match parsed.first_child() {
            Some(root) => root,
            None => return Ok(()),
        };
        while let Some(child) = root.first_child() {
            element.append(child);
        }
        Ok(())
    }
}
