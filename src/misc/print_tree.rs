//! A tree printer in the style of Servo's `print_tree`.
//!
//! Write errors are swallowed: this is a debugging aid and the callers have
//! nothing useful to do with them.

use std::io::Write;

pub struct PrintTree<'a> {
    /// The current level of recursion.
    level: u32,
    dest: &'a mut dyn Write,
}

impl<'a> PrintTree<'a> {
    pub fn new(title: &str, dest: &'a mut dyn Write) -> Self {
        let _ = writeln!(dest, "\u{250c} {}", title);
        Self { level: 1, dest }
    }

    /// Descend one level in the tree with the given title.
    pub fn new_level(&mut self, title: String) {
        for _ in 0..self.level {
            let _ = write!(self.dest, "\u{2502}  ");
        }
        let _ = writeln!(self.dest, "\u{251C}\u{2500} {}", title);
        self.level += 1;
    }

    /// Ascend one level in the tree.
    pub fn end_level(&mut self) {
        debug_assert!(self.level > 1, "Unbalanced end_level");
        self.level -= 1;
    }
}
