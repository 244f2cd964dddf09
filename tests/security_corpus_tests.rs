use std::sync::Arc;
use std::time::Duration;
use test_utils::constants::TEST_SECURITIES_FILE_PATH;
use test_utils::{load_securities_from_file, FlakySecurityProvider};
use ticker_resolver::models::SecurityCorpus;
use ticker_resolver::{Error, ResolverConfig, Security};
use tokio::time::Instant;

fn test_securities() -> Vec<Security> {
    load_securities_from_file(&TEST_SECURITIES_FILE_PATH).expect("Failed to load test securities")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_retries_with_backoff_until_success() {
        let provider = Arc::new(FlakySecurityProvider::new(test_securities(), 2));
        let corpus = SecurityCorpus::new(provider.clone(), ResolverConfig::default());

        let started = Instant::now();
        let index = corpus.snapshot(false).await.expect("Corpus should load");

        assert_eq!(provider.calls(), 3);
        assert!(!index.is_empty());
        // 500ms before the second attempt, 750ms before the third.
        assert!(started.elapsed() >= Duration::from_millis(1250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_configured_attempts() {
        let provider = Arc::new(FlakySecurityProvider::new(test_securities(), 10));
        let corpus = SecurityCorpus::new(provider.clone(), ResolverConfig::default());

        let result = corpus.snapshot(false).await;

        assert!(matches!(result, Err(Error::CorpusUnavailable(_))));
        assert_eq!(provider.calls(), 3);
        assert!(corpus.cached().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_corpus_is_unavailable() {
        let provider = Arc::new(FlakySecurityProvider::new(vec![], 0));
        let corpus = SecurityCorpus::new(provider.clone(), ResolverConfig::default());

        assert!(matches!(
            corpus.snapshot(false).await,
            Err(Error::CorpusUnavailable(_))
        ));
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_corpus_without_usable_rows_is_unavailable() {
        let provider = Arc::new(FlakySecurityProvider::new(
            vec![Security::new("NONAME", "  ", "NYSE", "NYSE")],
            0,
        ));
        let corpus = SecurityCorpus::new(provider, ResolverConfig::default());

        assert!(matches!(
            corpus.snapshot(false).await,
            Err(Error::CorpusUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_snapshot_is_cached_until_refresh() {
        let provider = Arc::new(FlakySecurityProvider::new(test_securities(), 0));
        let corpus = SecurityCorpus::new(provider.clone(), ResolverConfig::default());

        let first = corpus.snapshot(false).await.unwrap();
        let second = corpus.snapshot(false).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.calls(), 1);

        let refreshed = corpus.snapshot(true).await.unwrap();

        assert!(!Arc::ptr_eq(&first, &refreshed));
        assert_eq!(provider.calls(), 2);
        assert!(Arc::ptr_eq(&corpus.cached().await.unwrap(), &refreshed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_fetch() {
        let provider = Arc::new(
            FlakySecurityProvider::new(test_securities(), 0).with_latency(Duration::from_millis(200)),
        );
        let corpus = Arc::new(SecurityCorpus::new(
            provider.clone(),
            ResolverConfig::default(),
        ));

        let (first, second, third) = tokio::join!(
            corpus.snapshot(false),
            corpus.snapshot(false),
            corpus.snapshot(false)
        );

        let first = first.unwrap();
        assert!(Arc::ptr_eq(&first, &second.unwrap()));
        assert!(Arc::ptr_eq(&first, &third.unwrap()));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_attempt_count() {
        let provider = Arc::new(FlakySecurityProvider::new(test_securities(), 1));
        let config = ResolverConfig {
            corpus_fetch_attempts: 1,
            ..ResolverConfig::default()
        };
        let corpus = SecurityCorpus::new(provider.clone(), config);

        assert!(corpus.snapshot(false).await.is_err());
        assert_eq!(provider.calls(), 1);

        assert!(corpus.snapshot(false).await.is_ok());
        assert_eq!(provider.calls(), 2);
    }
}
