use domkit::class;
use domkit::{Document, HtmlDocument, NodeRef};

fn element(classes: Option<&str>) -> NodeRef {
    let document = HtmlDocument::new();
    let node = document.create_element("div");
    if let Some(classes) = classes {
        node.as_element()
            .unwrap()
            .attributes
            .borrow_mut()
            .insert("class", classes.to_owned());
    }
    node
}

fn class_name(node: &NodeRef) -> Option<String> {
    node.as_element()
        .unwrap()
        .attributes
        .borrow()
        .get("class")
        .map(str::to_owned)
}

#[test]
fn contains_checks_every_class() {
    let node = element(Some(" foo bar  baz "));
    assert!(class::contains(&node, "foo"));
    assert!(class::contains(&node, "bar baz"));
    assert!(class::contains(&node, "baz foo"));
    assert!(!class::contains(&node, "ba"));
    assert!(!class::contains(&node, "foo qux"));
}

#[test]
fn contains_on_odd_nodes() {
    assert!(class::contains(&element(None), ""));
    assert!(!class::contains(&element(Some("a b")), ""));
    assert!(!class::contains(&NodeRef::new_text("a"), "a"));
}

#[test]
fn add_appends_missing_classes() {
    let node = element(None);
    class::add(&node, " first ");
    assert_eq!(class_name(&node).as_deref(), Some("first"));

    class::add(&node, "second first third");
    assert_eq!(class_name(&node).as_deref(), Some("first second third"));
}

#[test]
fn add_leaves_untouched_attributes_alone() {
    let node = element(Some("  a  b "));
    class::add(&node, "b a");
    assert_eq!(class_name(&node).as_deref(), Some("  a  b "));
}

#[test]
fn remove_specific_or_all_classes() {
    let node = element(Some("a b c"));
    class::remove(&node, Some("b"));
    assert_eq!(class_name(&node).as_deref(), Some("a c"));

    class::remove(&node, Some("c a"));
    assert_eq!(class_name(&node).as_deref(), Some(""));

    let node = element(Some("x y"));
    class::remove(&node, None);
    assert_eq!(class_name(&node).as_deref(), Some(""));
}

#[test]
fn replace_removes_then_adds() {
    let node = element(Some("old keep"));
    class::replace(&node, "new", Some("old"));
    assert_eq!(class_name(&node).as_deref(), Some("keep new"));

    class::replace(&node, "only", None);
    assert_eq!(class_name(&node).as_deref(), Some("only"));
}

#[test]
fn toggle_flips_or_forces() {
    let node = element(Some("on"));
    assert_eq!(class::toggle(&node, "on off", None), None);
    assert_eq!(class_name(&node).as_deref(), Some("off"));

    assert_eq!(class::toggle(&node, "forced", Some(true)), Some(true));
    assert!(class::contains(&node, "off forced"));

    class::toggle(&node, "off forced", Some(false));
    assert_eq!(class_name(&node).as_deref(), Some(""));
}

#[test]
fn writes_to_non_elements_are_ignored() {
    let text = NodeRef::new_text("hello");
    class::add(&text, "a");
    class::remove(&text, None);
    class::toggle(&text, "a", None);
    assert_eq!(text.text_contents(), "hello");
}
