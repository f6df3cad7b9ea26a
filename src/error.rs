use std::io;
use thiserror::Error;

/// The errors that DOM operations can surface to the caller.
///
/// Markup is never validated: a parse always produces whatever tree html5ever
/// recovers, so none of these come from malformed input.
#[derive(Debug, Error)]
pub enum Error {
    #[error("markup can only be assigned to an element")]
    NotAnElement,
    #[error("the reference node has no parent")]
    Detached,
    #[error("a node can't be inserted into itself or one of its descendants")]
    HierarchyRequest,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;
