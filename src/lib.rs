//! DOM construction utilities on top of kuchiki trees.
//!
//! The interesting part is [`FragmentParser`], which turns snippets of markup
//! (including ones that are only valid inside tables, lists or selects) into
//! detached nodes. The rest are the small helpers that place, remove and
//! decorate those nodes.

#[macro_use]
extern crate html5ever;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod class;
pub mod construct;
pub mod document;
pub mod dom;
mod error;
pub mod fragment;
mod misc;

pub use crate::construct::Position;
pub use crate::document::{Document, DocumentId, HtmlDocument};
pub use crate::error::{Error, Result};
pub use crate::fragment::{FragmentParser, ParseResult, ParserConfig, Whitespace};
pub use kuchiki::NodeRef;
