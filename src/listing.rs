//! Raw package listing: the input shape consumed from the external loader.
//!
//! The payload is a JSON object mapping package paths to arrays of entity
//! records. A record carries a mandatory `name` (the qualified name) plus one
//! or more kind-marker fields, each paired with a doc-reference path:
//!
//! ```json
//! {
//!   "monix.cats": [
//!     { "object": "monix/cats/reverse$.html", "name": "monix.cats.reverse" },
//!     { "trait": "monix/cats/MonixToCatsConversions.html",
//!       "name": "monix.cats.MonixToCatsConversions" }
//!   ]
//! }
//! ```
//!
//! Marker presence is the only kind discrimination the raw format has; the
//! builder turns it into an explicit [`SymbolKind`] per record. Package order
//! is preserved as delivered.

use crate::types::SymbolKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("failed to parse listing JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("payload is not an `Index.PACKAGES = {{...}};` assignment")]
    NotAnAssignment,
}

pub type ListingResult<T> = Result<T, ListingError>;

/// One entity record as delivered by the doc generator.
///
/// `trait` and `case class` are not valid Rust field names; serde renames
/// keep the wire spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntity {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(rename = "trait", default, skip_serializing_if = "Option::is_none")]
    pub trait_: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    #[serde(
        rename = "case class",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub case_class: Option<String>,
}

impl RawEntity {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, doc_ref: impl Into<String>) -> Self {
        self.class = Some(doc_ref.into());
        self
    }

    pub fn with_trait(mut self, doc_ref: impl Into<String>) -> Self {
        self.trait_ = Some(doc_ref.into());
        self
    }

    pub fn with_object(mut self, doc_ref: impl Into<String>) -> Self {
        self.object = Some(doc_ref.into());
        self
    }

    pub fn with_case_class(mut self, doc_ref: impl Into<String>) -> Self {
        self.case_class = Some(doc_ref.into());
        self
    }

    /// Present kind markers in detection priority order:
    /// class, trait, object, case-class.
    pub fn kind_markers(&self) -> impl Iterator<Item = (SymbolKind, &str)> {
        [
            (SymbolKind::Class, self.class.as_deref()),
            (SymbolKind::Trait, self.trait_.as_deref()),
            (SymbolKind::Object, self.object.as_deref()),
            (SymbolKind::CaseClass, self.case_class.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, doc_ref)| doc_ref.map(|r| (kind, r)))
    }

    pub fn marker_count(&self) -> usize {
        self.kind_markers().count()
    }
}

/// Ordered mapping from package path to its entity records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageListing {
    packages: IndexMap<String, Vec<RawEntity>>,
}

impl PackageListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bare JSON object payload.
    pub fn from_json_str(json: &str) -> ListingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse the payload as shipped by the doc generator: a JavaScript
    /// assignment of the form `Index.PACKAGES = {...};`.
    pub fn from_js_payload(source: &str) -> ListingResult<Self> {
        let (_, value) = source
            .split_once('=')
            .ok_or(ListingError::NotAnAssignment)?;
        let json = value.trim().trim_end_matches(';').trim_end();
        Self::from_json_str(json)
    }

    /// Replace the entity records for a package.
    pub fn insert(&mut self, package_path: impl Into<String>, entities: Vec<RawEntity>) {
        self.packages.insert(package_path.into(), entities);
    }

    /// Append one entity record to a package, creating it if absent.
    pub fn push_entity(&mut self, package_path: impl Into<String>, entity: RawEntity) {
        self.packages
            .entry(package_path.into())
            .or_default()
            .push(entity);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RawEntity])> {
        self.packages
            .iter()
            .map(|(path, entities)| (path.as_str(), entities.as_slice()))
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn entity_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
