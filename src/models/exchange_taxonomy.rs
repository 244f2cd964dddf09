use crate::constants::{
    ALL_EXCHANGES_SENTINEL, EXCHANGE_SYNONYMS, HONG_KONG_EXCHANGE_KEYS, HONG_KONG_SYMBOL_SUFFIX,
};
use crate::models::Security;
use crate::types::ExchangeKey;
use crate::utils::symbol_has_suffix;

/// Canonical exchange identifiers and their synonym sets.
///
/// Answers "is this security listed on exchange X" when exchanges are named loosely
/// (long names, short codes or symbol suffixes).
pub struct ExchangeTaxonomy {
    synonyms: &'static [(ExchangeKey, &'static [&'static str])],
}

impl Default for ExchangeTaxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeTaxonomy {
    pub fn new() -> Self {
        Self {
            synonyms: EXCHANGE_SYNONYMS,
        }
    }

    /// Resolves free text to a canonical exchange key.
    ///
    /// The lookup is case-insensitive: canonical keys are matched first, then every
    /// synonym set is searched in table order.
    pub fn find_canonical_exchange_key(&self, text: &str) -> Option<ExchangeKey> {
        let text = text.trim();

        if text.is_empty() {
            return None;
        }

        self.synonyms
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(text))
            .or_else(|| {
                self.synonyms.iter().find(|(_, synonyms)| {
                    synonyms
                        .iter()
                        .any(|synonym| synonym.eq_ignore_ascii_case(text))
                })
            })
            .map(|(key, _)| *key)
    }

    /// All synonyms of a canonical key. The Hong Kong keys share each other's synonyms.
    pub fn synonyms_for(&self, exchange_key: ExchangeKey) -> Vec<&'static str> {
        let equivalent_keys: &[ExchangeKey] = if is_hong_kong_key(exchange_key) {
            HONG_KONG_EXCHANGE_KEYS
        } else {
            std::slice::from_ref(&exchange_key)
        };

        let mut synonyms: Vec<&'static str> = Vec::new();

        for (key, key_synonyms) in self.synonyms {
            if equivalent_keys.contains(key) {
                for synonym in std::iter::once(key).chain(key_synonyms.iter()) {
                    if !synonyms.contains(synonym) {
                        synonyms.push(*synonym);
                    }
                }
            }
        }

        synonyms
    }

    /// Whether `security` is listed on the exchange named by `exchange_key`.
    ///
    /// An empty key or the `all` sentinel matches everything. Unknown keys fall back to a
    /// direct comparison against the security's exchange fields and symbol suffix.
    pub fn is_security_from_exchange(&self, security: &Security, exchange_key: &str) -> bool {
        let exchange_key = exchange_key.trim();

        if exchange_key.is_empty() || exchange_key.eq_ignore_ascii_case(ALL_EXCHANGES_SENTINEL) {
            return true;
        }

        let canonical_key = match self.find_canonical_exchange_key(exchange_key) {
            Some(canonical_key) => canonical_key,
            None => {
                return security
                    .exchange_short_name
                    .trim()
                    .eq_ignore_ascii_case(exchange_key)
                    || security.exchange.trim().eq_ignore_ascii_case(exchange_key)
                    || symbol_has_suffix(&security.symbol, exchange_key, &['.']);
            }
        };

        if is_hong_kong_key(canonical_key)
            && symbol_has_suffix(&security.symbol, HONG_KONG_SYMBOL_SUFFIX, &['.'])
        {
            return true;
        }

        self.synonyms_for(canonical_key).iter().any(|synonym| {
            security
                .exchange_short_name
                .trim()
                .eq_ignore_ascii_case(synonym)
                || security.exchange.trim().eq_ignore_ascii_case(synonym)
                || (is_suffix_token(synonym)
                    && symbol_has_suffix(&security.symbol, synonym, &['.', ':']))
        })
    }
}

fn is_hong_kong_key(exchange_key: &str) -> bool {
    HONG_KONG_EXCHANGE_KEYS
        .iter()
        .any(|key| key.eq_ignore_ascii_case(exchange_key))
}

/// Only single-word codes (e.g. `HK`, `SS`, `L`) can appear as symbol suffixes.
fn is_suffix_token(synonym: &str) -> bool {
    synonym.chars().all(|c| c.is_ascii_alphanumeric())
}
