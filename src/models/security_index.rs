use crate::models::{EnhancedSecurity, Security, Tokenizer};
use crate::types::CorpusIndex;
use log::info;
use std::collections::HashMap;

/// An immutable snapshot of the securities corpus with derived search metadata and
/// lookup tables. Built once per corpus load and shared between resolutions.
pub struct SecurityIndex {
    securities: Vec<EnhancedSecurity>,
    symbol_map: HashMap<String, Vec<CorpusIndex>>,
    acronym_map: HashMap<String, Vec<CorpusIndex>>,
    search_term_map: HashMap<String, Vec<CorpusIndex>>,
    normalized_name_map: HashMap<String, Vec<CorpusIndex>>,
}

impl SecurityIndex {
    /// Enhances every security and builds the lookup tables.
    ///
    /// Securities with an empty symbol or name are skipped.
    pub fn new(securities: Vec<Security>) -> Self {
        let name_tokenizer = Tokenizer::company_name_parser();
        let verbatim_tokenizer = Tokenizer::verbatim_name_parser();

        info!("Enhancing {} securities...", securities.len());

        let enhanced_securities: Vec<EnhancedSecurity> = securities
            .into_iter()
            .filter(|security| !security.symbol.trim().is_empty() && !security.name.trim().is_empty())
            .map(|security| EnhancedSecurity::new(security, &name_tokenizer, &verbatim_tokenizer))
            .collect();

        let mut instance = SecurityIndex {
            symbol_map: HashMap::with_capacity(enhanced_securities.len()),
            acronym_map: HashMap::new(),
            search_term_map: HashMap::new(),
            normalized_name_map: HashMap::with_capacity(enhanced_securities.len()),
            securities: enhanced_securities,
        };

        info!("Building security lookup tables...");
        instance.ingest_lookup_tables();

        instance
    }

    fn ingest_lookup_tables(&mut self) {
        for (corpus_index, security) in self.securities.iter().enumerate() {
            self.symbol_map
                .entry(security.lowercase_symbol.clone())
                .or_default()
                .push(corpus_index);

            for acronym in &security.acronyms {
                self.acronym_map
                    .entry(acronym.to_lowercase())
                    .or_default()
                    .push(corpus_index);
            }

            for search_term in &security.search_terms {
                self.search_term_map
                    .entry(search_term.clone())
                    .or_default()
                    .push(corpus_index);
            }

            if !security.normalized_name.is_empty() {
                self.normalized_name_map
                    .entry(security.normalized_name.clone())
                    .or_default()
                    .push(corpus_index);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.securities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    pub fn get(&self, corpus_index: CorpusIndex) -> Option<&EnhancedSecurity> {
        self.securities.get(corpus_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CorpusIndex, &EnhancedSecurity)> {
        self.securities.iter().enumerate()
    }

    /// Securities whose symbol case-insensitively equals `symbol`. Cross-listed duplicates
    /// are all returned.
    pub fn lookup_symbol(&self, symbol: &str) -> &[CorpusIndex] {
        lookup(&self.symbol_map, &symbol.trim().to_lowercase())
    }

    /// Expects a lowercased acronym.
    pub fn lookup_acronym(&self, acronym: &str) -> &[CorpusIndex] {
        lookup(&self.acronym_map, acronym)
    }

    /// Expects a lowercased search term.
    pub fn lookup_search_term(&self, search_term: &str) -> &[CorpusIndex] {
        lookup(&self.search_term_map, search_term)
    }

    /// Expects a lowercased name with whitespace and punctuation removed.
    pub fn lookup_normalized_name(&self, normalized_name: &str) -> &[CorpusIndex] {
        lookup(&self.normalized_name_map, normalized_name)
    }
}

fn lookup<'a>(map: &'a HashMap<String, Vec<CorpusIndex>>, key: &str) -> &'a [CorpusIndex] {
    map.get(key).map(Vec::as_slice).unwrap_or(&[])
}
