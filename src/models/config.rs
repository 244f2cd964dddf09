use crate::config::DEFAULT_RESOLVER_CONFIG;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Maximum weighted distance accepted by the approximate match pass.
    pub fuzzy_threshold: f64,

    /// The approximate match pass only runs while an entity has fewer direct matches than this.
    pub min_direct_matches: usize,

    /// Upper bound on the number of approximate matches kept per entity.
    pub max_fuzzy_results: usize,

    /// Minimum query length (in chars) for substring containment against security names.
    pub min_substring_query_len: usize,

    pub corpus_fetch_attempts: usize,
    pub corpus_retry_initial_delay: Duration,
    pub corpus_retry_backoff_factor: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        DEFAULT_RESOLVER_CONFIG
    }
}
