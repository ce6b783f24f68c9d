//! Search options and their validation boundary.
//!
//! Options are validated where they are constructed: a kind filter built
//! from strings (the shape a search widget sends) is rejected here with
//! [`QueryError::InvalidOption`] before any matching runs. `search` itself
//! cannot fail on a built table.

use crate::config::SearchConfig;
use crate::types::{SymbolKind, UnknownKindName};
use std::collections::HashSet;
use thiserror::Error;

pub const DEFAULT_MAX_RESULTS: usize = 50;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("invalid search option: {0}")]
    InvalidOption(#[from] UnknownKindName),
}

pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Upper bound on returned hits, applied after full ranking.
    pub max_results: usize,
    /// Restricts the candidate set before matching; `None` means all kinds.
    pub kind_filter: Option<HashSet<SymbolKind>>,
    /// When false (the default), term and names are compared on a
    /// lowercase projection; returned records keep their original casing.
    pub case_sensitive: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            kind_filter: None,
            case_sensitive: false,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed defaults from configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            max_results: config.max_results,
            kind_filter: None,
            case_sensitive: config.case_sensitive,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_kind_filter(mut self, kinds: impl IntoIterator<Item = SymbolKind>) -> Self {
        self.kind_filter = Some(kinds.into_iter().collect());
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// String-facing kind filter, e.g. from a widget's query parameters.
    /// Unrecognized names are rejected before any matching occurs.
    pub fn with_kind_names<I, S>(self, names: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kinds = names
            .into_iter()
            .map(|name| name.as_ref().parse::<SymbolKind>())
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(Self {
            kind_filter: Some(kinds),
            ..self
        })
    }

    /// Whether this kind survives the filter.
    pub fn admits(&self, kind: SymbolKind) -> bool {
        self.kind_filter
            .as_ref()
            .is_none_or(|kinds| kinds.contains(&kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.max_results, 50);
        assert!(options.kind_filter.is_none());
        assert!(!options.case_sensitive);
    }

    #[test]
    fn test_kind_names_boundary() {
        let options = SearchOptions::new()
            .with_kind_names(["trait", "class"])
            .unwrap();
        assert!(options.admits(SymbolKind::Trait));
        assert!(options.admits(SymbolKind::Class));
        assert!(!options.admits(SymbolKind::Object));

        let err = SearchOptions::new()
            .with_kind_names(["trait", "enum"])
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidOption(ref e) if e.0 == "enum"));
    }

    #[test]
    fn test_no_filter_admits_all() {
        let options = SearchOptions::default();
        for kind in SymbolKind::ALL {
            assert!(options.admits(kind));
        }
    }
}
