use crate::models::{EntityQuery, MatchReason, Tokenizer};
use crate::types::{CompanyName, TickerSymbol};
use crate::utils::{generate_acronyms, strip_non_alphanumeric, symbol_code};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Deref;

/// A tradable instrument record as supplied by the securities corpus provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub symbol: TickerSymbol,
    pub name: CompanyName,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub exchange_short_name: String,
    #[serde(default, rename = "type")]
    pub security_type: Option<String>,
}

impl Security {
    pub fn new(symbol: &str, name: &str, exchange: &str, exchange_short_name: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            exchange: exchange.to_string(),
            exchange_short_name: exchange_short_name.to_string(),
            security_type: None,
        }
    }
}

/// A `Security` with search metadata derived once, when the corpus is loaded.
#[derive(Debug, Clone)]
pub struct EnhancedSecurity {
    pub security: Security,

    /// Uppercase abbreviations of the name (see `generate_acronyms`).
    pub acronyms: BTreeSet<String>,

    /// Lowercased, stop-word-filtered tokens of the name.
    pub name_words: Vec<String>,

    /// Lowercased union of name, name words, acronyms and compacted name/symbol variants.
    pub search_terms: BTreeSet<String>,

    pub lowercase_symbol: String,
    pub lowercase_name: String,

    /// Lowercased name with whitespace and punctuation removed.
    pub normalized_name: String,
}

impl EnhancedSecurity {
    pub fn new(
        security: Security,
        name_tokenizer: &Tokenizer,
        verbatim_tokenizer: &Tokenizer,
    ) -> Self {
        let lowercase_symbol = security.symbol.trim().to_lowercase();
        let lowercase_name = security.name.trim().to_lowercase();
        let normalized_name = strip_non_alphanumeric(&lowercase_name);

        let name_words = name_tokenizer.tokenize(&security.name);
        let raw_words = verbatim_tokenizer.tokenize(&security.name);
        let acronyms = generate_acronyms(&security.name, &raw_words, &name_words);

        let mut search_terms: BTreeSet<String> = BTreeSet::new();
        search_terms.insert(lowercase_name.clone());
        search_terms.extend(name_words.iter().cloned());
        search_terms.extend(acronyms.iter().map(|acronym| acronym.to_lowercase()));
        search_terms.insert(normalized_name.clone());
        search_terms.insert(lowercase_name.split_whitespace().collect());
        search_terms.insert(lowercase_symbol.clone());
        search_terms.insert(symbol_code(&lowercase_symbol).to_string());
        search_terms.insert(strip_non_alphanumeric(&lowercase_symbol));
        search_terms.retain(|term| !term.is_empty());

        Self {
            security,
            acronyms,
            name_words,
            search_terms,
            lowercase_symbol,
            lowercase_name,
            normalized_name,
        }
    }

    pub fn has_acronym(&self, query: &str) -> bool {
        self.acronyms
            .iter()
            .any(|acronym| acronym.eq_ignore_ascii_case(query))
    }

    /// Determines why this security directly matches the entity query, if it does.
    ///
    /// Checked in order: explicit symbol, symbol, acronym, search term, normalized name and
    /// (for queries of at least `min_substring_query_len` chars) name containment.
    pub fn direct_match_reason(
        &self,
        query: &EntityQuery,
        min_substring_query_len: usize,
    ) -> Option<MatchReason> {
        if let Some(symbol) = &query.symbol {
            if self.lowercase_symbol == *symbol {
                return Some(MatchReason::ExplicitSymbol);
            }
        }

        if query.normalized.is_empty() {
            return None;
        }

        if self.lowercase_symbol == query.normalized {
            Some(MatchReason::ExactSymbol)
        } else if self.has_acronym(&query.normalized) {
            Some(MatchReason::Acronym)
        } else if self.search_terms.contains(&query.normalized) {
            Some(MatchReason::SearchTerm)
        } else if !query.compact.is_empty() && self.normalized_name == query.compact {
            Some(MatchReason::NormalizedName)
        } else if query.normalized.chars().count() >= min_substring_query_len
            && self.lowercase_name.contains(&query.normalized)
        {
            Some(MatchReason::NameSubstring)
        } else {
            None
        }
    }

    /// Whether a purely numeric entity name occurs within this symbol, with or without
    /// its leading zeros.
    pub fn matches_numeric_code(&self, query: &EntityQuery) -> bool {
        query
            .numeric_variants
            .iter()
            .any(|variant| self.lowercase_symbol.contains(variant.as_str()))
    }
}

impl Deref for EnhancedSecurity {
    type Target = Security;

    fn deref(&self) -> &Self::Target {
        &self.security
    }
}
