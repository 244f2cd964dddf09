use crate::models::{
    EnhancedSecurity, EntityQuery, ExchangeTaxonomy, ExtractedEntity, Geography, MatchCandidate,
    MatchReason, MatchSet, ResolverConfig, SecurityIndex,
};
use crate::types::{CorpusIndex, EntityId, SelectionScore, TickerSymbol};
use crate::utils::{
    has_derivative_marker, has_exchange_suffix, is_whole_token, market_cap_rank, name_match_tier,
    primary_market_rank, symbol_code,
};
use log::debug;
use serde::{Serialize, Serializer};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Which branch of the cascade picked a ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionReason {
    FuzzyNumericFallback,
    UserSpecifiedExchange(String),
    GlobalMatchQuality,
    PreferredExchange(Geography),
    SmartFallback(SelectionScore),
    OnlyOneMatch,
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionReason::FuzzyNumericFallback => {
                write!(f, "Fuzzy match - no exact match found")
            }
            SelectionReason::UserSpecifiedExchange(exchange) => {
                write!(f, "User specified exchange: {}", exchange)
            }
            SelectionReason::GlobalMatchQuality => {
                write!(f, "Global setting, sorted by match quality and market cap")
            }
            SelectionReason::PreferredExchange(geography) => {
                write!(f, "Matched preferred exchange for {}", geography)
            }
            SelectionReason::SmartFallback(score) => {
                write!(f, "Smart fallback prioritization with score {}", score)
            }
            SelectionReason::OnlyOneMatch => write!(f, "Only one match available"),
        }
    }
}

impl Serialize for SelectionReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDebugInfo {
    pub symbol: TickerSymbol,
    pub name: String,
    pub exchange_short_name: String,
    pub match_reason: MatchReason,
}

/// Audit trail of one selection: what was considered and why the winner won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerDebugInfo {
    pub ticker: TickerSymbol,
    pub entity_name: String,
    pub exchange_context: String,
    pub candidates: Vec<CandidateDebugInfo>,
    pub selection_reason: SelectionReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSelection {
    pub entity_id: EntityId,
    pub ticker: TickerSymbol,
}

/// Result of one prioritization call. Built fresh on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prioritization {
    /// Selected tickers in entity order, at most one per entity.
    pub selections: Vec<TickerSelection>,
    pub entity_map: BTreeMap<EntityId, TickerSymbol>,
    pub debug_map: BTreeMap<EntityId, TickerDebugInfo>,
}

#[derive(Clone, Copy)]
struct Candidate<'a> {
    reason: MatchReason,
    security: &'a EnhancedSecurity,
}

struct Decision<'a> {
    winner: Candidate<'a>,
    reason: SelectionReason,
    considered: Vec<Candidate<'a>>,
}

/// Selects exactly one ticker per entity using exchange hints, the geography preference
/// and name-similarity scoring.
pub struct GeographyPrioritizer<'a> {
    config: &'a ResolverConfig,
    index: &'a SecurityIndex,
    taxonomy: &'a ExchangeTaxonomy,
    geography: Geography,
}

impl<'a> GeographyPrioritizer<'a> {
    pub fn new(
        config: &'a ResolverConfig,
        index: &'a SecurityIndex,
        taxonomy: &'a ExchangeTaxonomy,
        geography: Geography,
    ) -> Self {
        Self {
            config,
            index,
            taxonomy,
            geography,
        }
    }

    pub fn prioritize(&self, entities: &[ExtractedEntity], match_set: &MatchSet) -> Prioritization {
        let mut prioritization = Prioritization::default();

        for (entity_id, entity) in entities.iter().enumerate() {
            let decision = match self.resolve_entity(entity_id, entity, match_set) {
                Some(decision) => decision,
                None => {
                    debug!("Entity #{} {:?} resolved to no ticker", entity_id, entity.name);
                    continue;
                }
            };

            let ticker = decision.winner.security.symbol.clone();

            debug!(
                "Entity #{} {:?} -> {} ({})",
                entity_id, entity.name, ticker, decision.reason
            );

            prioritization.debug_map.insert(
                entity_id,
                TickerDebugInfo {
                    ticker: ticker.clone(),
                    entity_name: entity.name.clone(),
                    exchange_context: entity
                        .exchange
                        .clone()
                        .unwrap_or_else(|| self.geography.to_string()),
                    candidates: decision
                        .considered
                        .iter()
                        .map(|candidate| CandidateDebugInfo {
                            symbol: candidate.security.symbol.clone(),
                            name: candidate.security.name.clone(),
                            exchange_short_name: candidate.security.exchange_short_name.clone(),
                            match_reason: candidate.reason,
                        })
                        .collect(),
                    selection_reason: decision.reason,
                },
            );
            prioritization.entity_map.insert(entity_id, ticker.clone());
            prioritization
                .selections
                .push(TickerSelection { entity_id, ticker });
        }

        prioritization
    }

    /// Runs the cascade for one entity; the first applicable branch decides.
    fn resolve_entity(
        &self,
        entity_id: EntityId,
        entity: &ExtractedEntity,
        match_set: &MatchSet,
    ) -> Option<Decision<'a>> {
        let query = entity.query();
        let candidates = self.direct_candidates(&query, match_set.candidates_for(entity_id));

        if candidates.is_empty() {
            if query.is_numeric() {
                return self.numeric_fallback(&query, match_set);
            }

            return None;
        }

        if let Some(exchange) = entity
            .exchange
            .as_deref()
            .map(str::trim)
            .filter(|exchange| !exchange.is_empty())
        {
            if let Some(decision) = self.select_on_exchange(&query, exchange, &candidates) {
                return Some(decision);
            }
        }

        if self.geography.preferred_exchanges().is_empty() {
            return self.select_by_global_score(&query, candidates);
        }

        if let Some(decision) = self.select_on_preferred_exchange(&query, &candidates) {
            return Some(decision);
        }

        if candidates.len() > 1 {
            return self.select_by_fallback_score(&query, candidates);
        }

        candidates.first().copied().map(|winner| Decision {
            winner,
            reason: SelectionReason::OnlyOneMatch,
            considered: candidates,
        })
    }

    /// The entity's own candidates that satisfy the direct match predicates. Approximate
    /// matches survive only if a direct predicate holds, or the symbol contains the
    /// numeric entity name verbatim, and are relabelled with that reason.
    fn direct_candidates(
        &self,
        query: &EntityQuery,
        match_candidates: &[MatchCandidate],
    ) -> Vec<Candidate<'a>> {
        let mut seen: HashSet<CorpusIndex> = HashSet::new();
        let mut candidates = Vec::with_capacity(match_candidates.len());

        for match_candidate in match_candidates {
            let security = match self.index.get(match_candidate.corpus_index) {
                Some(security) => security,
                None => continue,
            };

            let reason = match match_candidate.reason {
                MatchReason::Fuzzy | MatchReason::NumericFallback => {
                    match security.direct_match_reason(query, self.config.min_substring_query_len) {
                        Some(reason) => reason,
                        None if query.is_numeric()
                            && security.lowercase_symbol.contains(&query.normalized) =>
                        {
                            MatchReason::NumericCode
                        }
                        None => continue,
                    }
                }
                reason => reason,
            };

            if seen.insert(match_candidate.corpus_index) {
                candidates.push(Candidate {
                    reason,
                    security,
                });
            }
        }

        candidates
    }

    /// A purely numeric entity with no direct matches takes the best security from the
    /// pool of everything matched in this call.
    fn numeric_fallback(&self, query: &EntityQuery, match_set: &MatchSet) -> Option<Decision<'a>> {
        let mut seen: HashSet<CorpusIndex> = HashSet::new();

        let mut pool: Vec<Candidate<'a>> = match_set
            .pool
            .iter()
            .filter(|corpus_index| seen.insert(**corpus_index))
            .filter_map(|corpus_index| {
                self.index.get(*corpus_index).map(|security| Candidate {
                    reason: if security.matches_numeric_code(query) {
                        MatchReason::NumericCode
                    } else {
                        MatchReason::NumericFallback
                    },
                    security,
                })
            })
            .collect();

        pool.sort_by_cached_key(|candidate| {
            (
                Reverse(candidate.reason == MatchReason::NumericCode),
                Reverse(self.is_on_preferred_exchange(candidate.security)),
                candidate.security.symbol.len(),
            )
        });

        pool.first().copied().map(|winner| Decision {
            winner,
            reason: SelectionReason::FuzzyNumericFallback,
            considered: pool,
        })
    }

    fn select_on_exchange(
        &self,
        query: &EntityQuery,
        exchange: &str,
        candidates: &[Candidate<'a>],
    ) -> Option<Decision<'a>> {
        let mut on_exchange: Vec<Candidate<'a>> = candidates
            .iter()
            .filter(|candidate| {
                self.taxonomy
                    .is_security_from_exchange(candidate.security, exchange)
            })
            .copied()
            .collect();

        on_exchange.sort_by_cached_key(|candidate| {
            (
                Reverse(is_exact_name_match(query, candidate.security)),
                Reverse(has_exchange_suffix(&candidate.security.symbol)),
                candidate.security.symbol.len(),
            )
        });

        on_exchange.first().copied().map(|winner| Decision {
            winner,
            reason: SelectionReason::UserSpecifiedExchange(exchange.to_string()),
            considered: candidates.to_vec(),
        })
    }

    fn select_by_global_score(
        &self,
        query: &EntityQuery,
        mut candidates: Vec<Candidate<'a>>,
    ) -> Option<Decision<'a>> {
        let considered = candidates.clone();

        candidates.sort_by_cached_key(|candidate| {
            let security = candidate.security;

            (
                Reverse(global_score(query, security)),
                Reverse(is_exact_name_match(query, security)),
                Reverse(!has_exchange_suffix(&security.symbol)),
                market_cap_rank(&security.exchange_short_name),
            )
        });

        candidates.first().copied().map(|winner| Decision {
            winner,
            reason: SelectionReason::GlobalMatchQuality,
            considered,
        })
    }

    fn select_on_preferred_exchange(
        &self,
        query: &EntityQuery,
        candidates: &[Candidate<'a>],
    ) -> Option<Decision<'a>> {
        let mut on_preferred: Vec<Candidate<'a>> = candidates
            .iter()
            .filter(|candidate| self.is_on_preferred_exchange(candidate.security))
            .copied()
            .collect();

        on_preferred.sort_by_cached_key(|candidate| {
            let security = candidate.security;

            (
                Reverse(name_match_tier(&security.lowercase_name, &query.normalized)),
                Reverse(self.geography.prefers_symbol(&security.symbol)),
                self.listing_code_len(&security.symbol),
                security.symbol.len(),
            )
        });

        on_preferred.first().copied().map(|winner| Decision {
            winner,
            reason: SelectionReason::PreferredExchange(self.geography),
            considered: candidates.to_vec(),
        })
    }

    fn select_by_fallback_score(
        &self,
        query: &EntityQuery,
        mut candidates: Vec<Candidate<'a>>,
    ) -> Option<Decision<'a>> {
        let considered = candidates.clone();

        candidates.sort_by_cached_key(|candidate| {
            let security = candidate.security;

            (
                Reverse(fallback_score(query, security)),
                Reverse(is_exact_name_match(query, security)),
                Reverse(self.geography.prefers_symbol(&security.symbol)),
                Reverse(primary_market_rank(&security.exchange_short_name)),
                security.symbol.len(),
            )
        });

        candidates.first().copied().map(|winner| Decision {
            winner,
            reason: SelectionReason::SmartFallback(fallback_score(query, winner.security)),
            considered,
        })
    }

    fn is_on_preferred_exchange(&self, security: &EnhancedSecurity) -> bool {
        self.geography
            .preferred_exchanges()
            .iter()
            .any(|exchange| self.taxonomy.is_security_from_exchange(security, exchange))
    }

    /// Hong Kong prefers shorter numeric listing codes; other geographies ignore it.
    fn listing_code_len(&self, symbol: &str) -> usize {
        match self.geography {
            Geography::Hk => symbol_code(symbol).len(),
            _ => 0,
        }
    }
}

fn is_exact_name_match(query: &EntityQuery, security: &EnhancedSecurity) -> bool {
    security.lowercase_name == query.normalized
}

/// Name match quality, bare primary listing and exchange market-cap heuristics, with
/// derivative products pushed down.
fn global_score(query: &EntityQuery, security: &EnhancedSecurity) -> SelectionScore {
    let mut score = name_match_tier(&security.lowercase_name, &query.normalized).score();

    if !has_exchange_suffix(&security.symbol) {
        score += 3_000;
    }

    score += 1_000 - market_cap_rank(&security.exchange_short_name) * 100;

    if has_derivative_marker(&security.lowercase_name) {
        score -= 5_000;
    }

    score
}

fn fallback_score(query: &EntityQuery, security: &EnhancedSecurity) -> SelectionScore {
    let mut score = name_match_tier(&security.lowercase_name, &query.normalized).score();

    if is_whole_token(&security.lowercase_name, &query.normalized) {
        score += 500;
    }

    if security.lowercase_symbol == query.normalized {
        score += 8_000;
    }

    let symbol_prefix: String = query.normalized.chars().take(2).collect();
    if !symbol_prefix.is_empty() && security.lowercase_symbol.starts_with(&symbol_prefix) {
        score += 2_000;
    }

    let exchange_short_name = security.exchange_short_name.trim();
    if exchange_short_name.eq_ignore_ascii_case("NYSE")
        || exchange_short_name.eq_ignore_ascii_case("NASDAQ")
    {
        score += 500;
    }

    if has_derivative_marker(&security.lowercase_name) {
        score -= 1_000;
    }

    score
}
