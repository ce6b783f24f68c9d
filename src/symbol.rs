//! Symbol and package records.
//!
//! Both are immutable once the table is built. `simple_name` is always
//! derived from the qualified name, never set independently.

use crate::types::{CompactString, PackageId, SymbolId, SymbolKind};
use serde::{Deserialize, Serialize};

/// A documentation namespace grouping symbols under a dotted path.
///
/// The root package has the empty path and may own zero symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub path: CompactString,
}

impl Package {
    pub fn new(id: PackageId, path: &str) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// True when `qualified_name` lives directly or transitively under this
    /// package. The root package owns every name.
    pub fn owns(&self, qualified_name: &str) -> bool {
        if self.is_root() {
            return true;
        }
        qualified_name
            .strip_prefix(self.path.as_ref())
            .is_some_and(|rest| rest.starts_with('.'))
    }
}

/// One documented entity: the atomic indexed unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    /// Full dotted path, unique per kind across the whole index.
    pub qualified_name: CompactString,
    /// Last segment of the qualified name.
    pub simple_name: CompactString,
    pub kind: SymbolKind,
    /// Opaque reference to the symbol's documentation page.
    pub doc_ref: CompactString,
    /// Owning package, lookup only.
    pub package_id: PackageId,
}

impl Symbol {
    pub fn new(
        id: SymbolId,
        qualified_name: &str,
        kind: SymbolKind,
        doc_ref: &str,
        package_id: PackageId,
    ) -> Self {
        Self {
            id,
            qualified_name: qualified_name.into(),
            simple_name: simple_name_of(qualified_name).into(),
            kind,
            doc_ref: doc_ref.into(),
            package_id,
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn doc_ref(&self) -> &str {
        &self.doc_ref
    }
}

/// Substring after the last `.`, or the whole name when it has no dots.
pub fn simple_name_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, last)| last)
}
