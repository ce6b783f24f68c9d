//! Tier-based match ranking.
//!
//! Matching policy, best tier first:
//! 1. exact match on the simple name
//! 2. prefix match on the simple name
//! 3. prefix match on the qualified name
//! 4. substring match anywhere in the qualified name
//!
//! Within a tier: shorter qualified name first, then lexicographic
//! ascending. The whole candidate set is ranked before the result is cut to
//! `max_results`, so a low-tier match can never displace a higher-tier one.

use crate::symbol::Symbol;
use crate::table::SymbolTable;
use crate::types::{SymbolId, SymbolKind};
use serde::Serialize;
use tracing::debug;

use super::options::SearchOptions;

/// Priority bucket a hit matched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchTier {
    ExactName,
    NamePrefix,
    QualifiedPrefix,
    QualifiedSubstring,
}

impl MatchTier {
    /// Flat relevance score per tier; ordering is decided by tier and the
    /// secondary rule, never by comparing these floats.
    pub fn score(self) -> f32 {
        match self {
            MatchTier::ExactName => 1.0,
            MatchTier::NamePrefix => 0.75,
            MatchTier::QualifiedPrefix => 0.5,
            MatchTier::QualifiedSubstring => 0.25,
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub symbol: Symbol,
    pub tier: MatchTier,
    pub score: f32,
}

/// Read-only query engine over a built table.
///
/// Holds no per-query state: `search` may be re-invoked with any term and
/// options, concurrently, without side effects.
pub struct QueryEngine<'a> {
    table: &'a SymbolTable,
}

impl<'a> QueryEngine<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// Ranked search. An empty or whitespace-only term yields no hits.
    pub fn search(&self, term: &str, options: &SearchOptions) -> Vec<SearchHit> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }

        let lowered;
        let term = if options.case_sensitive {
            term
        } else {
            lowered = term.to_lowercase();
            lowered.as_str()
        };

        let mut matches: Vec<(MatchTier, SymbolId)> = Vec::new();
        match &options.kind_filter {
            Some(kinds) => {
                for kind in SymbolKind::ALL {
                    if !kinds.contains(&kind) {
                        continue;
                    }
                    for &id in self.table.kind_ids(kind) {
                        self.classify(id, term, options, &mut matches);
                    }
                }
            }
            None => {
                for symbol in self.table.iter() {
                    self.classify(symbol.id, term, options, &mut matches);
                }
            }
        }

        matches.sort_by(|&(tier_a, id_a), &(tier_b, id_b)| {
            tier_a.cmp(&tier_b).then_with(|| {
                let a = self.comparison_path(id_a, options);
                let b = self.comparison_path(id_b, options);
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            })
        });
        matches.truncate(options.max_results);

        debug!(term, hits = matches.len(), "search completed");

        matches
            .into_iter()
            .filter_map(|(tier, id)| {
                self.table.symbol(id).map(|symbol| SearchHit {
                    symbol: symbol.clone(),
                    tier,
                    score: tier.score(),
                })
            })
            .collect()
    }

    fn classify(
        &self,
        id: SymbolId,
        term: &str,
        options: &SearchOptions,
        matches: &mut Vec<(MatchTier, SymbolId)>,
    ) {
        let (simple, qualified) = self.comparison_names(id, options);

        let tier = if simple == term {
            MatchTier::ExactName
        } else if simple.starts_with(term) {
            MatchTier::NamePrefix
        } else if qualified.starts_with(term) {
            MatchTier::QualifiedPrefix
        } else if qualified.contains(term) {
            MatchTier::QualifiedSubstring
        } else {
            return;
        };

        matches.push((tier, id));
    }

    fn comparison_names(&self, id: SymbolId, options: &SearchOptions) -> (&str, &str) {
        if options.case_sensitive {
            let symbol = &self.table.symbols[id.value() as usize - 1];
            (symbol.simple_name(), symbol.qualified_name())
        } else {
            let projection = self.table.projection(id);
            (&projection.simple, &projection.qualified)
        }
    }

    fn comparison_path(&self, id: SymbolId, options: &SearchOptions) -> &str {
        self.comparison_names(id, options).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{PackageListing, RawEntity};

    fn entity(name: &str) -> RawEntity {
        RawEntity::named(name).with_class(format!("{}.html", name.replace('.', "/")))
    }

    fn sample_table() -> SymbolTable {
        let mut listing = PackageListing::new();
        listing.insert(
            "a.b",
            vec![
                entity("a.b.Widget"),
                RawEntity::named("a.b.Widget").with_object("a/b/Widget$.html"),
            ],
        );
        listing.insert(
            "a.c",
            vec![
                entity("a.c.WidgetFactory"),
                RawEntity::named("a.c.Widget").with_trait("a/c/Widget.html"),
            ],
        );
        listing.insert("z", vec![entity("z.MidWidgetEnd")]);
        SymbolTable::build(&listing).unwrap()
    }

    fn names(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.symbol.qualified_name()).collect()
    }

    #[test]
    fn test_empty_and_whitespace_terms() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);
        assert!(engine.search("", &SearchOptions::default()).is_empty());
        assert!(engine.search("   ", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_tier_ordering() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);

        let hits = engine.search("Widget", &SearchOptions::default());
        assert_eq!(
            names(&hits),
            vec![
                "a.b.Widget",
                "a.b.Widget",
                "a.c.Widget",
                "a.c.WidgetFactory",
                "z.MidWidgetEnd",
            ]
        );
        assert_eq!(hits[0].tier, MatchTier::ExactName);
        assert_eq!(hits[3].tier, MatchTier::NamePrefix);
        assert_eq!(hits[4].tier, MatchTier::QualifiedSubstring);
        assert!(hits[0].score > hits[4].score);
    }

    #[test]
    fn test_exact_beats_prefix() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);

        let hits = engine.search("Widget", &SearchOptions::default());
        let exact = hits.iter().position(|h| h.symbol.qualified_name() == "a.b.Widget");
        let prefix = hits
            .iter()
            .position(|h| h.symbol.qualified_name() == "a.c.WidgetFactory");
        assert!(exact.unwrap() < prefix.unwrap());
    }

    #[test]
    fn test_qualified_prefix_tier() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);

        let hits = engine.search("a.c.wid", &SearchOptions::default());
        assert_eq!(names(&hits), vec!["a.c.Widget", "a.c.WidgetFactory"]);
        assert!(hits.iter().all(|h| h.tier == MatchTier::QualifiedPrefix));
    }

    #[test]
    fn test_secondary_order_shorter_then_lexicographic() {
        let mut listing = PackageListing::new();
        listing.insert("bbb", vec![entity("bbb.Item")]);
        listing.insert("aa.x", vec![entity("aa.x.Item")]);
        listing.insert("ab", vec![entity("ab.Item")]);
        listing.insert("aa", vec![entity("aa.Item")]);
        let table = SymbolTable::build(&listing).unwrap();
        let engine = QueryEngine::new(&table);

        let hits = engine.search("Item", &SearchOptions::default());
        // All exact-tier: shorter qualified names first, ties broken
        // lexicographically ("aa.Item" before "ab.Item").
        assert_eq!(
            names(&hits),
            vec!["aa.Item", "ab.Item", "bbb.Item", "aa.x.Item"]
        );
    }

    #[test]
    fn test_kind_filter_restricts_before_matching() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);

        let options = SearchOptions::default().with_kind_filter([SymbolKind::Trait]);
        let hits = engine.search("Widget", &options);
        assert_eq!(names(&hits), vec!["a.c.Widget"]);
        assert_eq!(hits[0].symbol.kind, SymbolKind::Trait);
    }

    #[test]
    fn test_filtered_out_symbols_free_slots() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);

        // Only one result slot: without a filter the class companion wins it;
        // with a trait filter the trait takes it instead of being truncated.
        let options = SearchOptions::default()
            .with_max_results(1)
            .with_kind_filter([SymbolKind::Trait]);
        let hits = engine.search("Widget", &options);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol.kind, SymbolKind::Trait);
    }

    #[test]
    fn test_truncation_happens_after_full_ranking() {
        let mut listing = PackageListing::new();
        // "aaa.gad.Thing" matches only as a qualified substring but is
        // scanned first and sorts lexicographically earlier; with scan-time
        // truncation it would leak into the single result slot.
        listing.insert("aaa.gad", vec![entity("aaa.gad.Thing")]);
        listing.insert("zzz", vec![entity("zzz.Gad")]);
        let table = SymbolTable::build(&listing).unwrap();
        let engine = QueryEngine::new(&table);

        let hits = engine.search("Gad", &SearchOptions::default().with_max_results(1));
        assert_eq!(names(&hits), vec!["zzz.Gad"]);
        assert_eq!(hits[0].tier, MatchTier::ExactName);
    }

    #[test]
    fn test_max_results_bound() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);

        for max in 0..6 {
            let hits = engine.search(
                "Widget",
                &SearchOptions::default().with_max_results(max),
            );
            assert!(hits.len() <= max);
        }
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);

        let hits = engine.search("widget", &SearchOptions::default());
        assert_eq!(hits[0].symbol.qualified_name(), "a.b.Widget");
        // Original casing is preserved in results.
        assert_eq!(hits[0].symbol.simple_name(), "Widget");
    }

    #[test]
    fn test_case_sensitive_option() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);

        let options = SearchOptions::default().with_case_sensitive(true);
        assert!(engine.search("widget", &options).is_empty());
        assert!(!engine.search("Widget", &options).is_empty());
    }

    #[test]
    fn test_companion_pair_both_exact() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);

        let options = SearchOptions::default()
            .with_kind_filter([SymbolKind::Class, SymbolKind::Object]);
        let hits: Vec<_> = engine
            .search("Widget", &options)
            .into_iter()
            .filter(|h| h.symbol.qualified_name() == "a.b.Widget")
            .collect();

        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.tier == MatchTier::ExactName));
        let kinds: Vec<_> = hits.iter().map(|h| h.symbol.kind).collect();
        assert!(kinds.contains(&SymbolKind::Class));
        assert!(kinds.contains(&SymbolKind::Object));
    }

    #[test]
    fn test_no_match() {
        let table = sample_table();
        let engine = QueryEngine::new(&table);
        assert!(engine.search("Nonexistent", &SearchOptions::default()).is_empty());
    }
}
