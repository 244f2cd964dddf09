use crate::models::ResolverConfig;
use std::time::Duration;

pub const DEFAULT_RESOLVER_CONFIG: ResolverConfig = ResolverConfig {
    fuzzy_threshold: 0.3,
    min_direct_matches: 3,
    max_fuzzy_results: 10,
    min_substring_query_len: 3,
    corpus_fetch_attempts: 3,
    corpus_retry_initial_delay: Duration::from_millis(500),
    corpus_retry_backoff_factor: 1.5,
};
