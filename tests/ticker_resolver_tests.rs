use std::sync::Arc;
use test_utils::constants::TEST_SECURITIES_FILE_PATH;
use test_utils::{
    format_groups, load_securities_from_file, FlakySecurityProvider, ScriptedOracle,
};
use ticker_resolver::models::SelectionReason;
use ticker_resolver::{
    Error, Geography, Language, ResolverConfig, StaticOracle, TickerGroup, TickerResolver,
};

fn provider(failures: usize) -> Arc<FlakySecurityProvider> {
    let securities =
        load_securities_from_file(&TEST_SECURITIES_FILE_PATH).expect("Failed to load test securities");

    Arc::new(FlakySecurityProvider::new(securities, failures))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_alibaba_on_two_exchanges_forms_one_group() {
        let resolver = TickerResolver::new(provider(0), Arc::new(StaticOracle::new("Alibaba [HKEX/NYSE]")));

        let resolution = resolver
            .resolve(
                "compare Alibaba in Hong Kong and US markets",
                Geography::Global,
                Language::En,
                None,
            )
            .await
            .unwrap();

        assert_eq!(resolution.entities.len(), 2);
        assert_eq!(
            resolution.groups,
            vec![TickerGroup {
                original_text: "Alibaba [HKEX/NYSE]".to_string(),
                tickers: vec!["9988.HK".to_string(), "BABA".to_string()],
            }]
        );
        assert_eq!(resolution.tickers(), vec!["9988.HK", "BABA"]);
        assert_eq!(resolution.entity_map.len(), 2);
        assert_eq!(resolution.debug_map[&0].entity_name, "Alibaba");
        assert_eq!(resolution.debug_map[&1].exchange_context, "NYSE");
    }

    #[tokio::test]
    async fn test_numeric_code_resolves_through_fallback() {
        let resolver = TickerResolver::new(provider(0), Arc::new(StaticOracle::new("00943")));

        let resolution = resolver
            .resolve("00943 股价", Geography::Hk, Language::Zh, None)
            .await
            .unwrap();

        assert_eq!(format_groups(&resolution), vec!["00943: 0943.HK"]);
        assert_eq!(
            resolution.debug_map[&0].selection_reason,
            SelectionReason::FuzzyNumericFallback
        );
        assert_eq!(
            resolution.debug_map[&0].selection_reason.to_string(),
            "Fuzzy match - no exact match found"
        );
    }

    #[tokio::test]
    async fn test_no_entities_is_an_empty_resolution() {
        let provider = provider(0);
        let resolver = TickerResolver::new(provider.clone(), Arc::new(StaticOracle::new("  \n")));

        let resolution = resolver
            .resolve("what is the weather", Geography::Us, Language::En, None)
            .await
            .unwrap();

        assert!(resolution.is_empty());
        assert!(resolution.entity_map.is_empty());
        // The corpus is not needed when nothing was extracted.
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_unmatched_entities_are_skipped_silently() {
        let resolver = TickerResolver::new(
            provider(0),
            Arc::new(StaticOracle::new("Qzxwvy Nonexistent, Microsoft")),
        );

        let resolution = resolver
            .resolve("", Geography::Us, Language::En, None)
            .await
            .unwrap();

        assert_eq!(format_groups(&resolution), vec!["Microsoft: MSFT"]);
        assert_eq!(resolution.entities.len(), 2);
        assert_eq!(resolution.entity_map.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[tokio::test]
    async fn test_oracle_failure_is_a_generic_error() {
        let oracle = Arc::new(ScriptedOracle::new("scripted", vec![Err("rate limited")]));
        let resolver = TickerResolver::new(provider(0), oracle.clone());

        let err = resolver
            .resolve("Apple", Geography::Us, Language::En, None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to extract tickers");
        match err {
            Error::TickerExtractionFailed(cause) => {
                assert!(matches!(*cause, Error::ExtractionError(_)))
            }
            other => panic!("Unexpected error: {:?}", other),
        }
        assert_eq!(oracle.calls(), 1);
        assert!(resolver.last_resolution().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_corpus_outage_is_a_generic_error() {
        let resolver = TickerResolver::new(provider(10), Arc::new(StaticOracle::new("Apple")));

        let err = resolver
            .resolve("Apple", Geography::Us, Language::En, None)
            .await
            .unwrap_err();

        match err {
            Error::TickerExtractionFailed(cause) => {
                assert!(matches!(*cause, Error::CorpusUnavailable(_)))
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_corpus_failures_are_retried() {
        let provider = provider(2);
        let resolver = TickerResolver::new(provider.clone(), Arc::new(StaticOracle::new("Apple")));

        let resolution = resolver
            .resolve("Apple", Geography::Us, Language::En, None)
            .await
            .unwrap();

        assert_eq!(resolution.tickers(), vec!["AAPL"]);
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_oracle_selector() {
        let resolver = TickerResolver::new(provider(0), Arc::new(StaticOracle::new("Apple")))
            .with_oracle(Arc::new(StaticOracle::named("backup", "Tencent")));

        let default_resolution = resolver
            .resolve("q", Geography::Hk, Language::En, None)
            .await
            .unwrap();
        assert_eq!(default_resolution.entities[0].name, "Apple");

        let selected = resolver
            .resolve("q", Geography::Hk, Language::En, Some("BACKUP"))
            .await
            .unwrap();
        assert_eq!(selected.tickers(), vec!["0700.HK"]);

        let err = resolver
            .resolve("q", Geography::Hk, Language::En, Some("missing"))
            .await
            .unwrap_err();
        match err {
            Error::TickerExtractionFailed(cause) => {
                assert!(matches!(*cause, Error::ExtractionError(_)))
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_last_resolution_tracks_latest_success() {
        let oracle = Arc::new(ScriptedOracle::new(
            "scripted",
            vec![Ok("Apple, HSBC"), Ok("Microsoft"), Err("timeout")],
        ));
        let resolver = TickerResolver::new(provider(0), oracle);

        let first = resolver
            .resolve("first", Geography::Us, Language::En, None)
            .await
            .unwrap();
        assert_eq!(first.tickers(), vec!["AAPL", "HSBC"]);

        let second = resolver
            .resolve("second", Geography::Us, Language::En, None)
            .await
            .unwrap();
        assert_eq!(second.entity_map.len(), 1);
        assert_eq!(second.entity_map[&0], "MSFT");
        assert_eq!(second.debug_map.len(), 1);

        assert!(resolver
            .resolve("third", Geography::Us, Language::En, None)
            .await
            .is_err());

        assert_eq!(resolver.last_resolution().await, Some(second));
    }

    #[tokio::test]
    async fn test_refresh_corpus_reloads_from_provider() {
        let provider = provider(0);
        let config = ResolverConfig {
            corpus_fetch_attempts: 5,
            ..ResolverConfig::default()
        };
        let resolver = TickerResolver::with_config(
            provider.clone(),
            Arc::new(StaticOracle::new("Apple")),
            config,
        );
        assert_eq!(resolver.config(), &config);

        resolver
            .resolve("Apple", Geography::Us, Language::En, None)
            .await
            .unwrap();
        resolver
            .resolve("Apple", Geography::Us, Language::En, None)
            .await
            .unwrap();
        assert_eq!(provider.calls(), 1);

        let count = resolver.refresh_corpus().await.unwrap();

        assert_eq!(provider.calls(), 2);
        assert_eq!(count, 21);
    }
}
