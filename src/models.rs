pub mod config;
pub use config::ResolverConfig;

pub mod csv_security_provider;
pub use csv_security_provider::CsvSecurityProvider;

pub mod entity_oracle;
pub use entity_oracle::{build_extraction_prompt, EntityOracle, StaticOracle};

pub mod entity_parser;
pub use entity_parser::EntityParser;

pub mod error;
pub use error::Error;

pub mod exchange_taxonomy;
pub use exchange_taxonomy::ExchangeTaxonomy;

pub mod extracted_entity;
pub use extracted_entity::{EntityQuery, ExtractedEntity};

pub mod geography;
pub use geography::{Geography, Language};

pub mod geography_prioritizer;
pub use geography_prioritizer::{
    CandidateDebugInfo, GeographyPrioritizer, Prioritization, SelectionReason, TickerDebugInfo,
    TickerSelection,
};

pub mod security;
pub use security::{EnhancedSecurity, Security};

pub mod security_corpus;
pub use security_corpus::{SecurityCorpus, SecurityProvider};

pub mod security_index;
pub use security_index::SecurityIndex;

pub mod security_matcher;
pub use security_matcher::{MatchCandidate, MatchReason, MatchSet, SecurityMatcher};

pub mod ticker_group;
pub use ticker_group::TickerGroup;

pub mod ticker_resolver;
pub use ticker_resolver::{resolve_entities, Resolution, TickerResolver};

pub mod tokenizer;
pub use tokenizer::Tokenizer;
