//! Error types for table construction.
//!
//! All variants are build-time and fatal to that build attempt: the caller
//! gets the error and no partially indexed table.

use crate::types::SymbolKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("malformed entity '{name}' in package '{package}': {reason}")]
    MalformedEntry {
        package: String,
        name: String,
        reason: String,
    },

    #[error("duplicate {kind} record for qualified name '{name}'")]
    DuplicateQualifiedName { kind: SymbolKind, name: String },

    #[error(
        "doc reference '{doc_ref}' disagrees with derived simple name of '{name}' (expected trailing segment '{expected}')"
    )]
    InconsistentRef {
        name: String,
        doc_ref: String,
        expected: String,
    },
}

pub type BuildResult<T> = Result<T, BuildError>;
