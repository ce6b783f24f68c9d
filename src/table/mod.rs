//! The built symbol table: an immutable, read-only view over every indexed
//! symbol plus the derived lookup maps.
//!
//! A table is built once from a raw listing and never mutated. When the
//! underlying listing changes, a new table is built and swapped in through
//! [`SharedTable`]; there is no incremental patching.

pub mod shared;

pub use shared::SharedTable;

use crate::indexing::{self, BuildResult};
use crate::listing::PackageListing;
use crate::symbol::{Package, Symbol};
use crate::types::{PackageId, SymbolId, SymbolKind};
use std::collections::HashMap;

/// Lowercase projections of a symbol's names, computed once at build so
/// case-insensitive queries never allocate per candidate.
#[derive(Debug, Clone)]
pub(crate) struct SearchProjection {
    pub(crate) simple: Box<str>,
    pub(crate) qualified: Box<str>,
}

#[derive(Debug)]
pub struct SymbolTable {
    pub(crate) packages: Vec<Package>,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) projections: Vec<SearchProjection>,
    pub(crate) by_qualified: HashMap<Box<str>, Vec<SymbolId>>,
    pub(crate) by_simple: HashMap<Box<str>, Vec<SymbolId>>,
    pub(crate) by_kind: HashMap<SymbolKind, Vec<SymbolId>>,
}

impl SymbolTable {
    /// Build a table from a raw listing in one synchronous pass.
    ///
    /// Fails with the first malformed entity, duplicate (kind, name) pair,
    /// or inconsistent doc reference; nothing partial survives a failure.
    pub fn build(listing: &PackageListing) -> BuildResult<Self> {
        indexing::builder::build(listing)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.value() as usize - 1)
    }

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(id.value() as usize - 1)
    }

    /// All packages, in listing order.
    pub fn all_packages(&self) -> &[Package] {
        &self.packages
    }

    /// All symbols, in build order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Records sharing a qualified name (one per kind-slot present).
    pub fn symbols_by_qualified_name(&self, name: &str) -> Vec<&Symbol> {
        self.lookup(self.by_qualified.get(name))
    }

    /// Records sharing a simple name, across all packages.
    pub fn symbols_by_simple_name(&self, name: &str) -> Vec<&Symbol> {
        self.lookup(self.by_simple.get(name))
    }

    pub fn symbols_of_kind(&self, kind: SymbolKind) -> Vec<&Symbol> {
        self.lookup(self.by_kind.get(&kind))
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub(crate) fn kind_ids(&self, kind: SymbolKind) -> &[SymbolId] {
        self.by_kind.get(&kind).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn projection(&self, id: SymbolId) -> &SearchProjection {
        &self.projections[id.value() as usize - 1]
    }

    fn lookup(&self, ids: Option<&Vec<SymbolId>>) -> Vec<&Symbol> {
        ids.map_or_else(Vec::new, |ids| {
            ids.iter().filter_map(|&id| self.symbol(id)).collect()
        })
    }
}
