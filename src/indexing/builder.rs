//! Single-pass normalization of a raw listing into a [`SymbolTable`].
//!
//! The raw format discriminates entity kinds by the mere presence of marker
//! fields. The builder decides the kind once per marker, in fixed priority
//! order (class, trait, object, case-class), and emits one immutable
//! [`Symbol`] record per marker. The whole pass either succeeds or the
//! partial state is discarded with the error.

use crate::listing::{PackageListing, RawEntity};
use crate::symbol::{Package, Symbol, simple_name_of};
use crate::table::{SearchProjection, SymbolTable};
use crate::types::{PackageId, SymbolId, SymbolKind};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::error::{BuildError, BuildResult};

pub(crate) fn build(listing: &PackageListing) -> BuildResult<SymbolTable> {
    let mut builder = TableBuilder::new();

    for (package_path, entities) in listing.iter() {
        let package_id = builder.add_package(package_path);
        for entity in entities {
            builder.add_entity(package_id, entity)?;
        }
    }

    let table = builder.finish();
    debug!(
        packages = table.package_count(),
        symbols = table.symbol_count(),
        "symbol table built"
    );
    Ok(table)
}

struct TableBuilder {
    packages: Vec<Package>,
    symbols: Vec<Symbol>,
    projections: Vec<SearchProjection>,
    by_qualified: HashMap<Box<str>, Vec<SymbolId>>,
    by_simple: HashMap<Box<str>, Vec<SymbolId>>,
    by_kind: HashMap<SymbolKind, Vec<SymbolId>>,
    seen: HashSet<(SymbolKind, Box<str>)>,
}

impl TableBuilder {
    fn new() -> Self {
        Self {
            packages: Vec::new(),
            symbols: Vec::new(),
            projections: Vec::new(),
            by_qualified: HashMap::new(),
            by_simple: HashMap::new(),
            by_kind: HashMap::new(),
            seen: HashSet::new(),
        }
    }

    fn add_package(&mut self, path: &str) -> PackageId {
        let id = PackageId::new(self.packages.len() as u32 + 1)
            .expect("package counter starts at 1");
        self.packages.push(Package::new(id, path));
        id
    }

    fn add_entity(&mut self, package_id: PackageId, entity: &RawEntity) -> BuildResult<()> {
        let package = &self.packages[package_id.value() as usize - 1];

        if entity.marker_count() == 0 {
            return Err(BuildError::MalformedEntry {
                package: package.path.to_string(),
                name: entity.name.clone(),
                reason: "no recognized kind marker".to_string(),
            });
        }

        if !package.owns(&entity.name) {
            return Err(BuildError::MalformedEntry {
                package: package.path.to_string(),
                name: entity.name.clone(),
                reason: "qualified name does not live under its package".to_string(),
            });
        }

        // Three or more markers on one record is outside observed data and
        // has no specified precedence. Flag it and index every marker.
        if entity.marker_count() >= 3 {
            warn!(
                name = %entity.name,
                markers = entity.marker_count(),
                "entity carries more than two kind markers"
            );
        }

        for (kind, doc_ref) in entity.kind_markers() {
            self.add_record(package_id, kind, &entity.name, doc_ref)?;
        }

        Ok(())
    }

    fn add_record(
        &mut self,
        package_id: PackageId,
        kind: SymbolKind,
        qualified_name: &str,
        doc_ref: &str,
    ) -> BuildResult<()> {
        let simple_name = simple_name_of(qualified_name);
        validate_doc_ref(kind, qualified_name, simple_name, doc_ref)?;

        if !self.seen.insert((kind, qualified_name.into())) {
            return Err(BuildError::DuplicateQualifiedName {
                kind,
                name: qualified_name.to_string(),
            });
        }

        let id = SymbolId::new(self.symbols.len() as u32 + 1)
            .expect("symbol counter starts at 1");
        let symbol = Symbol::new(id, qualified_name, kind, doc_ref, package_id);

        self.projections.push(SearchProjection {
            simple: simple_name.to_lowercase().into(),
            qualified: qualified_name.to_lowercase().into(),
        });
        self.by_qualified
            .entry(qualified_name.into())
            .or_default()
            .push(id);
        self.by_simple
            .entry(simple_name.into())
            .or_default()
            .push(id);
        self.by_kind.entry(kind).or_default().push(id);
        self.symbols.push(symbol);

        Ok(())
    }

    fn finish(self) -> SymbolTable {
        SymbolTable {
            packages: self.packages,
            symbols: self.symbols,
            projections: self.projections,
            by_qualified: self.by_qualified,
            by_simple: self.by_simple,
            by_kind: self.by_kind,
        }
    }
}

/// The generator emits `Simple.html` pages for type slots and `Simple$.html`
/// for object slots. The trailing segment of the reference must agree with
/// the derived simple name; observed data is consistent, but this is
/// validated rather than assumed.
fn validate_doc_ref(
    kind: SymbolKind,
    qualified_name: &str,
    simple_name: &str,
    doc_ref: &str,
) -> BuildResult<()> {
    let suffix = match kind {
        SymbolKind::Object => "$.html",
        _ => ".html",
    };
    let expected = format!("{simple_name}{suffix}");
    let segment = doc_ref.rsplit_once('/').map_or(doc_ref, |(_, last)| last);

    if segment != expected {
        return Err(BuildError::InconsistentRef {
            name: qualified_name.to_string(),
            doc_ref: doc_ref.to_string(),
            expected,
        });
    }
    Ok(())
}
