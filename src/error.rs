//! Editor-wide error taxonomy.
//!
//! Every fallible operation in the editor raises one of these variants at the
//! point of violation. Failures are local and synchronous: nothing is retried,
//! and a failed operation leaves all data structures in their pre-call state.

use std::fmt;

/// Errors raised by graph, engine, binding, and settings operations.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// An entity (node, edge, option) was added while already present.
    DuplicateEntity(String),
    /// An entity was removed or dereferenced while absent, including reads
    /// and writes through an unbound control.
    UnknownEntity(String),
    /// The factory or registry was asked for a kind it does not implement.
    UnsupportedKind(String),
    /// An operation ran before its required collaborator was supplied,
    /// e.g. assigning a node kind with no factory available.
    MissingPrerequisite(String),
    /// A settings value whose shape does not match the option's kind.
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEntity(what) => write!(f, "already present: {}", what),
            Self::UnknownEntity(what) => write!(f, "not found: {}", what),
            Self::UnsupportedKind(kind) => write!(f, "unsupported kind: {}", kind),
            Self::MissingPrerequisite(what) => write!(f, "missing prerequisite: {}", what),
            Self::KindMismatch { expected, found } => {
                write!(f, "kind mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for EditorError {}
