//! Manipulation of the `class` attribute as a whitespace-separated list.
//!
//! Writes only touch the attribute when the resulting value actually changes,
//! and are no-ops on nodes that aren't elements.

use kuchiki::NodeRef;
use std::collections::HashSet;

fn class_name(node: &NodeRef) -> Option<String> {
    let element = node.as_element()?;
    let attributes = element.attributes.borrow();
    Some(attributes.get(local_name!("class")).unwrap_or("").to_owned())
}

fn set_class_name(node: &NodeRef, value: String) {
    if let Some(element) = node.as_element() {
        element
            .attributes
            .borrow_mut()
            .insert(local_name!("class"), value);
    }
}

/// Returns the class list with `classes` appended, or `None` if all of them
/// were already present.
fn with_added(current: &str, classes: &str) -> Option<String> {
    let classes = classes.trim();
    let current = current.trim();
    if current.is_empty() {
        return Some(classes.to_owned());
    }

    let mut padded = format!(" {} ", current);
    let old_len = padded.len();
    for class in classes.split_whitespace() {
        if !padded.contains(&format!(" {} ", class)) {
            padded.push_str(class);
            padded.push(' ');
        }
    }
    if padded.len() == old_len {
        return None;
    }
    Some(padded[1..padded.len() - 1].to_owned())
}

/// Returns the class list with `classes` removed. `None` removes everything.
fn with_removed(current: &str, classes: Option<&str>) -> String {
    let classes = match classes {
        Some(classes) => classes,
        None => return String::new(),
    };
    let mut padded = format!(" {} ", current);
    for class in classes.split_whitespace() {
        padded = padded.replacen(&format!(" {} ", class), " ", 1);
    }
    padded.trim().to_owned()
}

/// Whether all of the space-separated `classes` are applied to `node`.
pub fn contains(node: &NodeRef, classes: &str) -> bool {
    let current = match class_name(node) {
        Some(current) => current,
        None => return false,
    };
    let classes = classes.trim();
    let current = current.trim();

    // Classes given in the same order they're applied in.
    if format!(" {} ", current).contains(&format!(" {} ", classes)) {
        return true;
    }
    if !classes.contains(char::is_whitespace) {
        return false;
    }

    let applied: HashSet<&str> = current.split_whitespace().collect();
    classes.split_whitespace().all(|class| applied.contains(class))
}

/// Appends the classes that aren't already there.
pub fn add(node: &NodeRef, classes: &str) {
    let current = match class_name(node) {
        Some(current) => current,
        None => return,
    };
    if let Some(updated) = with_added(&current, classes) {
        set_class_name(node, updated);
    }
}

/// Removes the given classes, or all of them if `classes` is `None`.
pub fn remove(node: &NodeRef, classes: Option<&str>) {
    let current = match class_name(node) {
        Some(current) => current,
        None => return,
    };
    let updated = with_removed(&current, classes);
    if updated != current {
        set_class_name(node, updated);
    }
}

/// Removes `to_remove` (everything if `None`) and adds `to_add`, writing the
/// attribute at most once.
pub fn replace(node: &NodeRef, to_add: &str, to_remove: Option<&str>) {
    let current = match class_name(node) {
        Some(current) => current,
        None => return,
    };
    let removed = with_removed(&current, to_remove);
    let updated = with_added(&removed, to_add).unwrap_or(removed);
    if updated != current {
        set_class_name(node, updated);
    }
}

/// Flips each of the given classes, or adds (`Some(true)`) or removes
/// (`Some(false)`) all of them. Returns `condition`.
pub fn toggle(node: &NodeRef, classes: &str, condition: Option<bool>) -> Option<bool> {
    match condition {
        Some(true) => add(node, classes),
        Some(false) => remove(node, Some(classes)),
        None => {
            for class in classes.split_whitespace() {
                if contains(node, class) {
                    remove(node, Some(class));
                } else {
                    add(node, class);
                }
            }
        }
    }
    condition
}
