//! Parses every file in `tests/fragments` and compares the resulting tree with
//! the one recorded in `tests/expectations`.

use domkit::dom;
use domkit::FragmentParser;
use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::Path;

fn print_diff(actual: &str, expected: &str, label: &str) {
    if actual == expected {
        return;
    }

    println!("{}", label);
    println!("diff expected generated");
    for diff in diff::lines(&expected, &actual) {
        match diff {
            diff::Result::Left(l) => println!("-{}", l),
            diff::Result::Both(l, _) => println!(" {}", l),
            diff::Result::Right(r) => println!("+{}", r),
        }
    }
}

fn compare_with_reference(fragment_path: &str, expectations_directory: &str) {
    let markup = fs::read_to_string(fragment_path).unwrap();
    // Editors like to add a trailing newline, which would otherwise show up as
    // an extra text node.
    let markup = markup.trim_end_matches('\n');

    let mut parser = FragmentParser::new();
    let result = parser.parse(markup).unwrap();
    let tree = {
        let mut tree = Cursor::new(Vec::new());
        dom::print_dom_to(result.node(), &mut tree);
        String::from_utf8(tree.into_inner()).unwrap()
    };

    let fragment_name = Path::new(fragment_path).file_stem().unwrap().to_str().unwrap();
    let expectations = Path::new(expectations_directory).join(format!("{}.dom.txt", fragment_name));
    let expected_tree = fs::read_to_string(&expectations).unwrap_or_default();

    if tree == expected_tree {
        return;
    }

    // Override the expectations.
    File::create(&expectations)
        .unwrap()
        .write_all(tree.as_bytes())
        .unwrap();

    print_diff(&tree, &expected_tree, "DOM differed");

    panic!("Expectation and test mismatch!");
}

macro_rules! test_fragment {
    ($function:ident, $fragment_file:expr, $expectations_directory:expr) => {
        #[test]
        fn $function() {
            compare_with_reference($fragment_file, $expectations_directory);
        }
    };
}

include!(concat!(env!("OUT_DIR"), "/fragment_tests.rs"));
