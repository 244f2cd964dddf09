mod config;
mod constants;
pub mod models;
pub use config::DEFAULT_RESOLVER_CONFIG;
pub use models::{
    CsvSecurityProvider, EntityOracle, EntityParser, Error, ExchangeTaxonomy, ExtractedEntity,
    Geography, Language, Resolution, ResolverConfig, Security, SecurityIndex, SecurityProvider,
    StaticOracle, TickerGroup, TickerResolver,
};
pub mod types;
pub mod utils;
pub use types::{CompanyName, EntityId, TickerSymbol};

/// Resolves an extraction oracle's raw output against `index` with the default
/// configuration.
///
/// # Arguments
/// * `raw_response` - Text produced by the extraction oracle (e.g. `Alibaba [HKEX/NYSE]`).
/// * `original_query` - The query the oracle was given; an echoed copy is ignored.
/// * `index` - The securities to resolve against.
/// * `geography` - The preferred market.
pub fn resolve_oracle_response(
    raw_response: &str,
    original_query: &str,
    index: &SecurityIndex,
    geography: Geography,
) -> Resolution {
    resolve_oracle_response_with_custom_config(
        raw_response,
        original_query,
        index,
        geography,
        &DEFAULT_RESOLVER_CONFIG,
    )
}

pub fn resolve_oracle_response_with_custom_config(
    raw_response: &str,
    original_query: &str,
    index: &SecurityIndex,
    geography: Geography,
    config: &ResolverConfig,
) -> Resolution {
    let entities = EntityParser::new().parse(raw_response, original_query);

    models::resolve_entities(
        config,
        index,
        &ExchangeTaxonomy::new(),
        entities,
        geography,
    )
}
