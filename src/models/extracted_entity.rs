use crate::types::{CompanyName, TickerSymbol};
use crate::utils::{is_numeric_code, normalize_query, numeric_code_variants, strip_non_alphanumeric};
use serde::Serialize;

/// One company mention parsed out of the extraction oracle's output.
///
/// Several entities may share a `name` with different `exchange` hints (a company listed
/// on multiple exchanges); they are kept apart by their position in the entity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEntity {
    pub name: CompanyName,
    pub symbol: Option<TickerSymbol>,
    pub exchange: Option<String>,
    pub original_text: Option<String>,
}

impl ExtractedEntity {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: None,
            exchange: None,
            original_text: None,
        }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    pub fn with_exchange(mut self, exchange: &str) -> Self {
        self.exchange = Some(exchange.to_string());
        self
    }

    pub fn with_original_text(mut self, original_text: &str) -> Self {
        self.original_text = Some(original_text.to_string());
        self
    }

    /// The query fragment this entity is grouped under: its original text, or its name.
    pub fn group_key(&self) -> &str {
        match &self.original_text {
            Some(original_text) if !original_text.is_empty() => original_text,
            _ => &self.name,
        }
    }

    pub fn query(&self) -> EntityQuery {
        EntityQuery::from_entity(self)
    }
}

/// Normalized forms of an entity used by the matching predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityQuery {
    /// Trimmed, lowercased name.
    pub normalized: String,

    /// `normalized` with whitespace and punctuation removed.
    pub compact: String,

    /// Lowercased explicit symbol, if the oracle emitted one.
    pub symbol: Option<String>,

    /// Numeric code variants; empty unless the name is purely numeric.
    pub numeric_variants: Vec<String>,
}

impl EntityQuery {
    pub fn from_entity(entity: &ExtractedEntity) -> Self {
        let normalized = normalize_query(&entity.name);
        let compact = strip_non_alphanumeric(&normalized);

        let numeric_variants = if is_numeric_code(&normalized) {
            numeric_code_variants(&normalized)
        } else {
            vec![]
        };

        Self {
            symbol: entity
                .symbol
                .as_ref()
                .map(|symbol| normalize_query(symbol))
                .filter(|symbol| !symbol.is_empty()),
            normalized,
            compact,
            numeric_variants,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !self.numeric_variants.is_empty()
    }
}
