//! Turns markup snippets into detached nodes.
//!
//! Some elements can't be parsed on their own: html5ever drops a stray `<tr>`
//! or `<option>` on the floor unless it shows up inside the right ancestors.
//! The parser looks at the leading tag of the snippet, wraps the markup in the
//! ancestor chain it needs, lets the document parse it inside a scratch
//! container, and then digs the parsed nodes back out of the wrapper.
//!
//! The scratch container is created once per document and kept in a
//! [`ScratchStore`], so repeated parses against the same document don't keep
//! allocating throwaway elements.

use crate::document::{Document, DocumentId, HtmlDocument};
use crate::error::Result;
use kuchiki::traits::*;
use kuchiki::NodeRef;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref LEADING_TAG: Regex =
        Regex::new(r"<\s*([A-Za-z0-9_:]+)").expect("Leading tag pattern should compile");
}

/// Tag name to the ancestors it needs, outermost first.
const CONTEXTS: &[(&str, &[&str])] = &[
    ("option", &["select"]),
    ("tbody", &["table"]),
    ("thead", &["table"]),
    ("tfoot", &["table"]),
    ("caption", &["table"]),
    ("colgroup", &["table"]),
    ("tr", &["table", "tbody"]),
    ("td", &["table", "tbody", "tr"]),
    ("th", &["table", "thead", "tr"]),
    ("legend", &["fieldset"]),
    ("col", &["table", "colgroup"]),
    ("li", &["ul"]),
];

/// The wrapping needed to parse a given tag.
#[derive(Debug)]
pub struct ContextEntry {
    ancestors: &'static [&'static str],
    open: String,
    close: String,
}

impl ContextEntry {
    fn new(tag: &str, ancestors: &'static [&'static str]) -> Self {
        debug_assert!(!ancestors.is_empty());
        // Options need a multi-select, otherwise the first one would be the
        // only one that could ever be marked as selected.
        let open = if tag == "option" {
            r#"<select multiple="multiple">"#.to_owned()
        } else {
            ancestors.iter().map(|a| format!("<{}>", a)).collect()
        };
        let close = ancestors.iter().rev().map(|a| format!("</{}>", a)).collect();
        Self {
            ancestors,
            open,
            close,
        }
    }

    pub fn ancestors(&self) -> &[&'static str] {
        self.ancestors
    }

    /// The opening tags of the ancestor chain, outermost first.
    pub fn open(&self) -> &str {
        &self.open
    }

    /// The closing tags of the ancestor chain, innermost first.
    pub fn close(&self) -> &str {
        &self.close
    }

    /// How many wrapper elements sit between the scratch container and the
    /// parent of the wrapped markup.
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    fn wrap(&self, markup: &str) -> String {
        let mut wrapped = String::with_capacity(self.open.len() + markup.len() + self.close.len());
        wrapped.push_str(&self.open);
        wrapped.push_str(markup);
        wrapped.push_str(&self.close);
        wrapped
    }
}

/// The set of tags that need a parse context.
#[derive(Debug)]
pub struct ContextTable {
    entries: HashMap<&'static str, ContextEntry>,
}

impl ContextTable {
    pub fn new() -> Self {
        let entries = CONTEXTS
            .iter()
            .map(|&(tag, ancestors)| (tag, ContextEntry::new(tag, ancestors)))
            .collect();
        Self { entries }
    }

    /// Looks up a lowercase tag name.
    pub fn get(&self, tag: &str) -> Option<&ContextEntry> {
        self.entries.get(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ContextTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the parser keeps its scratch containers, one per document.
pub trait ScratchStore {
    fn container(&self, document: DocumentId) -> Option<NodeRef>;
    fn insert(&mut self, document: DocumentId, container: NodeRef);
}

impl ScratchStore for HashMap<DocumentId, NodeRef> {
    fn container(&self, document: DocumentId) -> Option<NodeRef> {
        self.get(&document).cloned()
    }

    fn insert(&mut self, document: DocumentId, container: NodeRef) {
        HashMap::insert(self, document, container);
    }
}

/// What to do with whitespace surrounding the markup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Whitespace {
    /// Leave the markup alone. Leading or trailing whitespace becomes text
    /// nodes, which turns a single element into a fragment.
    Preserve,
    /// Trim the markup before looking at its leading tag.
    Trim,
}

/// The tag of the scratch container, which is also the context markup
/// without a table entry gets parsed in. It has to stay a plain flow container
/// for unknown tags to parse the way they would in a body.
const CONTAINER_TAG: &str = "div";

#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub whitespace: Whitespace,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            whitespace: Whitespace::Preserve,
        }
    }
}

/// The nodes a parse produced. Either way the caller owns them, and they're
/// detached from anything the parser keeps around.
#[derive(Debug)]
pub enum ParseResult {
    /// The markup produced exactly one top-level node.
    Node(NodeRef),
    /// A document fragment holding zero or several top-level nodes, in
    /// source order.
    Fragment(NodeRef),
}

impl ParseResult {
    pub fn node(&self) -> &NodeRef {
        match *self {
            ParseResult::Node(ref node) | ParseResult::Fragment(ref node) => node,
        }
    }

    pub fn into_node(self) -> NodeRef {
        match self {
            ParseResult::Node(node) | ParseResult::Fragment(node) => node,
        }
    }

    pub fn is_fragment(&self) -> bool {
        match *self {
            ParseResult::Node(..) => false,
            ParseResult::Fragment(..) => true,
        }
    }
}

/// Returns the lowercased name of the first tag in `markup`, or an empty
/// string if there's none.
pub fn leading_tag(markup: &str) -> String {
    LEADING_TAG
        .captures(markup)
        .map(|captures| captures[1].to_ascii_lowercase())
        .unwrap_or_default()
}

fn clear(container: &NodeRef) {
    while let Some(child) = container.first_child() {
        child.detach();
    }
}

pub struct FragmentParser<S = HashMap<DocumentId, NodeRef>> {
    table: ContextTable,
    config: ParserConfig,
    store: S,
    /// Used when no document is given explicitly.
    document: HtmlDocument,
}

impl FragmentParser {
    pub fn new() -> Self {
        Self::with_store(HashMap::new())
    }
}

impl Default for FragmentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ScratchStore> FragmentParser<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            table: ContextTable::new(),
            config: ParserConfig::default(),
            store,
            document: HtmlDocument::new(),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn table(&self) -> &ContextTable {
        &self.table
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The document used by [`FragmentParser::parse`].
    pub fn document(&self) -> &HtmlDocument {
        &self.document
    }

    /// Parses `markup` using the parser's own document.
    pub fn parse(&mut self, markup: &str) -> Result<ParseResult> {
        let document = self.document.clone();
        self.parse_in(markup, &document)
    }

    /// Parses `markup` into nodes created by `document`.
    pub fn parse_in<D>(&mut self, markup: &str, document: &D) -> Result<ParseResult>
    where
        D: Document + ?Sized,
    {
        let markup = match self.config.whitespace {
            Whitespace::Preserve => markup,
            Whitespace::Trim => markup.trim(),
        };

        let container = self.scratch_container(document);
        let tag = leading_tag(markup);
        let entry = self.table.get(&tag);

        let filled = match entry {
            Some(entry) => {
                trace!("Wrapping <{}> in {}", tag, entry.open());
                document.set_inner_html(&container, &entry.wrap(markup))
            }
            None => document.set_inner_html(&container, markup),
        };
        if let Err(e) = filled {
            clear(&container);
            return Err(e);
        }

        // html5ever moves content that isn't allowed inside the wrappers (text
        // in a table, say) out of them, so everything next to each wrapper on
        // the way down belongs to the result too.
        let mut leading = Vec::new();
        let mut trailing = Vec::new();
        let mut parent = container.clone();
        for _ in 0..entry.map_or(0, ContextEntry::depth) {
            let wrapper = match parent.children().elements().next() {
                Some(wrapper) => wrapper.as_node().clone(),
                None => break,
            };
            let mut after = Vec::new();
            let mut seen_wrapper = false;
            for child in parent.children() {
                if child == wrapper {
                    seen_wrapper = true;
                } else if seen_wrapper {
                    after.push(child);
                } else {
                    leading.push(child);
                }
            }
            trailing.push(after);
            parent = wrapper;
        }

        let mut nodes = leading;
        nodes.extend(parent.children());
        nodes.extend(trailing.into_iter().rev().flatten());

        let result = if nodes.len() == 1 {
            let node = nodes.remove(0);
            node.detach();
            ParseResult::Node(node)
        } else {
            let fragment = document.create_document_fragment();
            for node in nodes {
                fragment.append(node);
            }
            ParseResult::Fragment(fragment)
        };

        // Whatever is left are the wrapper elements.
        clear(&container);

        debug!(
            "Parsed {} bytes of markup into a {}",
            markup.len(),
            if result.is_fragment() { "fragment" } else { "node" }
        );
        Ok(result)
    }

    fn scratch_container<D>(&mut self, document: &D) -> NodeRef
    where
        D: Document + ?Sized,
    {
        let id = document.id();
        if let Some(container) = self.store.container(id) {
            return container;
        }
        debug!("Creating scratch container for {:?}", id);
        let container = document.create_element(CONTAINER_TAG);
        self.store.insert(id, container.clone());
        container
    }
}
