use crate::models::{
    EntityOracle, EntityParser, ExchangeTaxonomy, ExtractedEntity, Geography,
    GeographyPrioritizer, Language, ResolverConfig, SecurityCorpus, SecurityIndex,
    SecurityMatcher, SecurityProvider, TickerDebugInfo, TickerGroup, TickerSelection,
};
use crate::types::{EntityId, TickerSymbol};
use crate::Error;
use log::{error, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything one resolution produced. Entity ids index into `entities`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub entities: Vec<ExtractedEntity>,
    pub groups: Vec<TickerGroup>,
    pub selections: Vec<TickerSelection>,
    pub entity_map: BTreeMap<EntityId, TickerSymbol>,
    pub debug_map: BTreeMap<EntityId, TickerDebugInfo>,
}

impl Resolution {
    /// Selected tickers in entity order.
    pub fn tickers(&self) -> Vec<TickerSymbol> {
        self.selections
            .iter()
            .map(|selection| selection.ticker.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Runs the match, prioritize and group stages for already-parsed entities.
pub fn resolve_entities(
    config: &ResolverConfig,
    index: &SecurityIndex,
    taxonomy: &ExchangeTaxonomy,
    entities: Vec<ExtractedEntity>,
    geography: Geography,
) -> Resolution {
    let match_set = SecurityMatcher::new(config, index).match_entities(&entities);

    let prioritization =
        GeographyPrioritizer::new(config, index, taxonomy, geography).prioritize(&entities, &match_set);

    let groups = TickerGroup::group_selections(&entities, &prioritization.selections);

    Resolution {
        entities,
        groups,
        selections: prioritization.selections,
        entity_map: prioritization.entity_map,
        debug_map: prioritization.debug_map,
    }
}

/// Resolves free-text queries to grouped ticker symbols: oracle extraction, parsing,
/// matching against the cached corpus, prioritization and grouping.
pub struct TickerResolver {
    config: ResolverConfig,
    corpus: SecurityCorpus,
    taxonomy: ExchangeTaxonomy,
    parser: EntityParser,
    oracles: Vec<Arc<dyn EntityOracle>>,
    last_resolution: Mutex<Option<Resolution>>,
}

impl TickerResolver {
    /// Creates a resolver whose default oracle is `oracle`.
    pub fn new(provider: Arc<dyn SecurityProvider>, oracle: Arc<dyn EntityOracle>) -> Self {
        Self::with_config(provider, oracle, ResolverConfig::default())
    }

    pub fn with_config(
        provider: Arc<dyn SecurityProvider>,
        oracle: Arc<dyn EntityOracle>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            config,
            corpus: SecurityCorpus::new(provider, config),
            taxonomy: ExchangeTaxonomy::new(),
            parser: EntityParser::new(),
            oracles: vec![oracle],
            last_resolution: Mutex::new(None),
        }
    }

    /// Registers an additional oracle, selectable by its name.
    pub fn with_oracle(mut self, oracle: Arc<dyn EntityOracle>) -> Self {
        self.oracles.push(oracle);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves `query` to ticker groups.
    ///
    /// Finding no entities or no matches is not an error and yields an empty resolution.
    /// Any failure (oracle, unknown oracle selector, corpus) is logged and returned as
    /// `Error::TickerExtractionFailed`; no partial result is produced.
    pub async fn resolve(
        &self,
        query: &str,
        geography: Geography,
        language: Language,
        oracle_selector: Option<&str>,
    ) -> Result<Resolution, Error> {
        match self
            .try_resolve(query, geography, language, oracle_selector)
            .await
        {
            Ok(resolution) => {
                *self.last_resolution.lock().await = Some(resolution.clone());
                Ok(resolution)
            }
            Err(err) => {
                error!("Failed to extract tickers for query {:?}: {}", query, err);
                Err(Error::TickerExtractionFailed(Box::new(err)))
            }
        }
    }

    /// The most recent successful resolution, for diagnostic display.
    pub async fn last_resolution(&self) -> Option<Resolution> {
        self.last_resolution.lock().await.clone()
    }

    /// Reloads the corpus from the provider, returning the number of indexed securities.
    pub async fn refresh_corpus(&self) -> Result<usize, Error> {
        Ok(self.corpus.snapshot(true).await?.len())
    }

    async fn try_resolve(
        &self,
        query: &str,
        geography: Geography,
        language: Language,
        oracle_selector: Option<&str>,
    ) -> Result<Resolution, Error> {
        let oracle = self.select_oracle(oracle_selector)?;

        info!("Extracting entities with oracle {}...", oracle.name());
        let raw_response = oracle.extract(query, language).await?;

        let entities = self.parser.parse(&raw_response, query);
        if entities.is_empty() {
            info!("No entities extracted from query {:?}", query);
            return Ok(Resolution::default());
        }

        let index = self.corpus.snapshot(false).await?;

        info!(
            "Resolving {} entities against {} securities ({})...",
            entities.len(),
            index.len(),
            geography
        );

        Ok(resolve_entities(
            &self.config,
            &index,
            &self.taxonomy,
            entities,
            geography,
        ))
    }

    fn select_oracle(&self, oracle_selector: Option<&str>) -> Result<&Arc<dyn EntityOracle>, Error> {
        let selected = match oracle_selector.map(str::trim).filter(|name| !name.is_empty()) {
            None => self.oracles.first(),
            Some(name) => self
                .oracles
                .iter()
                .find(|oracle| oracle.name().eq_ignore_ascii_case(name)),
        };

        selected.ok_or_else(|| {
            Error::ExtractionError(format!(
                "Unknown oracle: {}",
                oracle_selector.unwrap_or_default()
            ))
        })
    }
}
