use crate::constants::{
    FUZZY_ACRONYM_WEIGHT, FUZZY_NAME_WEIGHT, FUZZY_SEARCH_TERM_WEIGHT, FUZZY_SYMBOL_WEIGHT,
};
use crate::models::{EntityQuery, ExtractedEntity, ResolverConfig, SecurityIndex};
use crate::types::{CorpusIndex, EntityId};
use crate::utils::weighted_fuzzy_distance;
use log::debug;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Why a security was judged relevant to an entity. Recorded at the point of match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchReason {
    /// The oracle emitted a symbol and this security carries it.
    ExplicitSymbol,
    ExactSymbol,
    Acronym,
    SearchTerm,
    NormalizedName,
    NameSubstring,
    /// A purely numeric entity name occurs within the symbol.
    NumericCode,
    /// Picked from the pool of all matched securities when nothing matched directly.
    NumericFallback,
    Fuzzy,
}

impl MatchReason {
    pub fn label(&self) -> &'static str {
        match self {
            MatchReason::ExplicitSymbol => "Explicit symbol match",
            MatchReason::ExactSymbol => "Symbol match",
            MatchReason::Acronym => "Acronym match",
            MatchReason::SearchTerm => "Search term match",
            MatchReason::NormalizedName => "Normalized name match",
            MatchReason::NameSubstring => "Name match",
            MatchReason::NumericCode => "Numeric code match",
            MatchReason::NumericFallback => "Numeric fallback",
            MatchReason::Fuzzy => "Fuzzy match",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for MatchReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchCandidate {
    pub corpus_index: CorpusIndex,
    pub reason: MatchReason,
}

/// Candidates per entity (indexed by `EntityId`) plus the flat concatenation of every
/// entity's candidates.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    pub entity_candidates: Vec<Vec<MatchCandidate>>,
    pub pool: Vec<CorpusIndex>,
}

impl MatchSet {
    pub fn candidates_for(&self, entity_id: EntityId) -> &[MatchCandidate] {
        self.entity_candidates
            .get(entity_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

/// Produces the syntactically plausible candidate securities for each entity.
pub struct SecurityMatcher<'a> {
    config: &'a ResolverConfig,
    index: &'a SecurityIndex,
}

impl<'a> SecurityMatcher<'a> {
    pub fn new(config: &'a ResolverConfig, index: &'a SecurityIndex) -> Self {
        Self { config, index }
    }

    /// Matches every entity independently. Entity ids are positions in `entities`.
    pub fn match_entities(&self, entities: &[ExtractedEntity]) -> MatchSet {
        let mut match_set = MatchSet::default();

        for (entity_id, entity) in entities.iter().enumerate() {
            let candidates = self.match_entity(entity);

            debug!(
                "Entity #{} {:?} matched {} securities",
                entity_id,
                entity.name,
                candidates.len()
            );

            match_set
                .pool
                .extend(candidates.iter().map(|candidate| candidate.corpus_index));
            match_set.entity_candidates.push(candidates);
        }

        match_set
    }

    /// Collects candidates for one entity, deduplicated by symbol.
    ///
    /// 1. Every security carrying the entity's explicit symbol.
    /// 2. Direct matches on the entity name: symbol, acronym, search term, normalized name
    ///    and name containment.
    /// 3. While fewer than `min_direct_matches` were found, approximate matches.
    pub fn match_entity(&self, entity: &ExtractedEntity) -> Vec<MatchCandidate> {
        let query = entity.query();
        let mut collector = CandidateCollector::new(self.index);

        if let Some(symbol) = &query.symbol {
            for corpus_index in self.index.lookup_symbol(symbol) {
                collector.push_cross_listed(*corpus_index, MatchReason::ExplicitSymbol);
            }
        }

        if query.normalized.is_empty() {
            return collector.into_candidates();
        }

        collector.extend(
            self.index.lookup_symbol(&query.normalized),
            MatchReason::ExactSymbol,
        );
        collector.extend(
            self.index.lookup_acronym(&query.normalized),
            MatchReason::Acronym,
        );
        collector.extend(
            self.index.lookup_search_term(&query.normalized),
            MatchReason::SearchTerm,
        );

        if !query.compact.is_empty() {
            collector.extend(
                self.index.lookup_normalized_name(&query.compact),
                MatchReason::NormalizedName,
            );
        }

        if query.normalized.chars().count() >= self.config.min_substring_query_len {
            for (corpus_index, security) in self.index.iter() {
                if security.lowercase_name.contains(&query.normalized) {
                    collector.push(corpus_index, MatchReason::NameSubstring);
                }
            }
        }

        if collector.len() < self.config.min_direct_matches {
            for corpus_index in self.fuzzy_match(&query, &collector) {
                collector.push(corpus_index, MatchReason::Fuzzy);
            }
        }

        collector.into_candidates()
    }

    /// Scores every not-yet-collected security against the entity name and returns those
    /// within `fuzzy_threshold`, closest first.
    fn fuzzy_match(&self, query: &EntityQuery, collector: &CandidateCollector) -> Vec<CorpusIndex> {
        let uppercased_query = query.normalized.to_uppercase();

        let mut scored: Vec<(f64, CorpusIndex)> = self
            .index
            .iter()
            .filter(|(_, security)| !collector.contains_symbol(&security.lowercase_symbol))
            .filter_map(|(corpus_index, security)| {
                let field_distance = weighted_fuzzy_distance(
                    &query.normalized,
                    [
                        (FUZZY_SYMBOL_WEIGHT, security.lowercase_symbol.as_str()),
                        (FUZZY_NAME_WEIGHT, security.lowercase_name.as_str()),
                    ]
                    .into_iter()
                    .chain(
                        security
                            .search_terms
                            .iter()
                            .map(|term| (FUZZY_SEARCH_TERM_WEIGHT, term.as_str())),
                    ),
                );

                let acronym_distance = weighted_fuzzy_distance(
                    &uppercased_query,
                    security
                        .acronyms
                        .iter()
                        .map(|acronym| (FUZZY_ACRONYM_WEIGHT, acronym.as_str())),
                );

                let distance = match (field_distance, acronym_distance) {
                    (Some(a), Some(b)) => a.min(b),
                    (Some(a), None) | (None, Some(a)) => a,
                    (None, None) => return None,
                };

                (distance <= self.config.fuzzy_threshold).then_some((distance, corpus_index))
            })
            .collect();

        scored.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });
        scored.truncate(self.config.max_fuzzy_results);

        scored
            .into_iter()
            .map(|(_, corpus_index)| corpus_index)
            .collect()
    }
}

/// Accumulates candidates for a single entity, keeping each symbol once.
struct CandidateCollector<'a> {
    index: &'a SecurityIndex,
    candidates: Vec<MatchCandidate>,
    seen_indices: HashSet<CorpusIndex>,
    seen_symbols: HashSet<String>,
}

impl<'a> CandidateCollector<'a> {
    fn new(index: &'a SecurityIndex) -> Self {
        Self {
            index,
            candidates: Vec::new(),
            seen_indices: HashSet::new(),
            seen_symbols: HashSet::new(),
        }
    }

    /// Adds a security even if another listing with the same symbol was collected.
    fn push_cross_listed(&mut self, corpus_index: CorpusIndex, reason: MatchReason) {
        if let Some(security) = self.index.get(corpus_index) {
            if self.seen_indices.insert(corpus_index) {
                self.seen_symbols.insert(security.lowercase_symbol.clone());
                self.candidates.push(MatchCandidate {
                    corpus_index,
                    reason,
                });
            }
        }
    }

    fn push(&mut self, corpus_index: CorpusIndex, reason: MatchReason) {
        if let Some(security) = self.index.get(corpus_index) {
            if !self.seen_symbols.contains(&security.lowercase_symbol) {
                self.push_cross_listed(corpus_index, reason);
            }
        }
    }

    fn extend(&mut self, corpus_indices: &[CorpusIndex], reason: MatchReason) {
        for corpus_index in corpus_indices {
            self.push(*corpus_index, reason);
        }
    }

    fn contains_symbol(&self, lowercase_symbol: &str) -> bool {
        self.seen_symbols.contains(lowercase_symbol)
    }

    fn len(&self) -> usize {
        self.candidates.len()
    }

    fn into_candidates(self) -> Vec<MatchCandidate> {
        self.candidates
    }
}
