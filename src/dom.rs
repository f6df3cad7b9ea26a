//! Lookup helpers, selectability, and a debug printer for node trees.

use crate::document::Document;
use crate::misc::print_tree::PrintTree;
use kuchiki::{NodeData, NodeRef};
use std::io::{self, Write};

/// Finds the element whose id is exactly `id`.
pub fn by_id<D>(document: &D, id: &str) -> Option<NodeRef>
where
    D: Document + ?Sized,
{
    if id.is_empty() {
        return None;
    }
    document.get_element_by_id(id)
}

/// Whether `node` is `ancestor` or lives somewhere below it.
pub fn contains(ancestor: &NodeRef, node: &NodeRef) -> bool {
    node.inclusive_ancestors().any(|n| n == *ancestor)
}

/// How an embedder disables text selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UserSelect {
    /// Through the given (possibly vendor-prefixed) CSS property.
    Property(&'static str),
    /// Through the legacy `unselectable` attribute, which doesn't inherit and
    /// thus has to be set on every descendant.
    Attribute,
}

/// Platform differences, resolved once by the embedder and handed to the
/// functions that care.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub user_select: UserSelect,
}

impl Capabilities {
    /// What an engine without `user-select` support needs.
    pub fn legacy() -> Self {
        Self {
            user_select: UserSelect::Attribute,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            user_select: UserSelect::Property("user-select"),
        }
    }
}

/// Enables or disables text selection on `node`.
pub fn set_selectable(capabilities: &Capabilities, node: &NodeRef, selectable: bool) {
    match capabilities.user_select {
        UserSelect::Property(property) => {
            let value = if selectable { None } else { Some("none") };
            set_style_property(node, property, value);
        }
        UserSelect::Attribute => {
            for descendant in node.inclusive_descendants() {
                let element = match descendant.as_element() {
                    Some(element) => element,
                    None => continue,
                };
                let mut attributes = element.attributes.borrow_mut();
                if selectable {
                    attributes.remove(local_name!("unselectable"));
                } else {
                    attributes.insert(local_name!("unselectable"), "on".to_owned());
                }
            }
        }
    }
}

/// Sets (or with `None`, clears) a declaration in the inline style of an
/// element, leaving the rest of the declarations alone.
fn set_style_property(node: &NodeRef, property: &str, value: Option<&str>) {
    let element = match node.as_element() {
        Some(element) => element,
        None => return,
    };
    let mut attributes = element.attributes.borrow_mut();
    let mut declarations: Vec<String> = attributes
        .get(local_name!("style"))
        .unwrap_or("")
        .split(';')
        .map(str::trim)
        .filter(|declaration| !declaration.is_empty())
        .filter(|declaration| {
            let name = declaration.split(':').next().unwrap_or("").trim();
            !name.eq_ignore_ascii_case(property)
        })
        .map(str::to_owned)
        .collect();

    if let Some(value) = value {
        declarations.push(format!("{}: {}", property, value));
    }

    if declarations.is_empty() {
        attributes.remove(local_name!("style"));
    } else {
        attributes.insert(local_name!("style"), declarations.join("; "));
    }
}

fn print_node(node: &NodeRef, print: &mut PrintTree) {
    print.new_level(match node.data() {
        NodeData::Document(..) => "#document".into(),
        NodeData::DocumentFragment => "#document-fragment".into(),
        NodeData::Comment(ref comment) => format!("<!-- {} -->", comment.borrow()),
        NodeData::ProcessingInstruction(ref content) => {
            let content = content.borrow();
            format!("<?{} {}?>", content.0, content.1)
        },
        NodeData::Doctype(ref doctype) => {
            format!("<!DOCTYPE {} {} {}>", doctype.name, doctype.public_id, doctype.system_id)
        },
        NodeData::Text(ref text) => {
            format!("#text {:?}", text.borrow())
        },
        NodeData::Element(ref element) => {
            let attributes = element.attributes.borrow();
            let mut label = format!("<{}", element.name.local);
            for (name, attribute) in attributes.map.iter() {
                label.push_str(&format!(" {}={:?}", name.local, attribute.value));
            }
            label.push('>');
            label
        }
    });

    for child in node.children() {
        print_node(&child, print);
    }

    print.end_level();
}

/// Prints a node tree to stdout.
pub fn print_dom(root: &NodeRef) {
    print_dom_to(root, &mut io::stdout());
}

/// Prints a node tree to a particular output.
pub fn print_dom_to(root: &NodeRef, dest: &mut dyn Write) {
    let mut tree = PrintTree::new("DOM tree", dest);
    print_node(root, &mut tree);
}

/// Serializes the children of `node`, the way `innerHTML` reads.
pub fn inner_html(node: &NodeRef) -> String {
    node.children().map(|child| child.to_string()).collect()
}
