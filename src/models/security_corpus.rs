use crate::models::{ResolverConfig, Security, SecurityIndex};
use crate::Error;
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Source of the tradable securities list.
#[async_trait]
pub trait SecurityProvider: Send + Sync {
    /// Provider name, used in log output.
    fn name(&self) -> &str;

    /// Returns the full securities list. Repeated calls return a consistent snapshot
    /// unless `force_refresh` is set.
    async fn get_securities(&self, force_refresh: bool) -> Result<Vec<Security>, Error>;
}

/// Loads the securities corpus through a `SecurityProvider` and caches the enhanced
/// index. Concurrent callers share a single in-flight fetch.
pub struct SecurityCorpus {
    provider: Arc<dyn SecurityProvider>,
    config: ResolverConfig,
    snapshot: Mutex<Option<Arc<SecurityIndex>>>,
}

impl SecurityCorpus {
    pub fn new(provider: Arc<dyn SecurityProvider>, config: ResolverConfig) -> Self {
        Self {
            provider,
            config,
            snapshot: Mutex::new(None),
        }
    }

    /// Returns the cached index, loading it first if nothing is cached or `force_refresh`
    /// is set.
    ///
    /// The lock is held across the fetch, so a caller arriving mid-fetch waits and then
    /// reuses the freshly loaded index instead of issuing its own request.
    pub async fn snapshot(&self, force_refresh: bool) -> Result<Arc<SecurityIndex>, Error> {
        let mut snapshot = self.snapshot.lock().await;

        if !force_refresh {
            if let Some(index) = snapshot.as_ref() {
                return Ok(Arc::clone(index));
            }
        }

        let securities = self.fetch_with_retry(force_refresh).await?;
        let index = Arc::new(SecurityIndex::new(securities));

        if index.is_empty() {
            return Err(Error::CorpusUnavailable(format!(
                "Provider {} returned no usable securities",
                self.provider.name()
            )));
        }

        info!(
            "Loaded {} securities from provider {}",
            index.len(),
            self.provider.name()
        );

        *snapshot = Some(Arc::clone(&index));

        Ok(index)
    }

    /// The cached index, if one has been loaded.
    pub async fn cached(&self) -> Option<Arc<SecurityIndex>> {
        self.snapshot.lock().await.as_ref().map(Arc::clone)
    }

    async fn fetch_with_retry(&self, force_refresh: bool) -> Result<Vec<Security>, Error> {
        let attempts = self.config.corpus_fetch_attempts.max(1);
        let mut delay = self.config.corpus_retry_initial_delay;
        let mut last_error: Option<Error> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                warn!(
                    "Retrying corpus fetch from {} (attempt {}/{}) in {:?}",
                    self.provider.name(),
                    attempt + 1,
                    attempts,
                    delay
                );
                sleep(delay).await;
                delay = Duration::from_secs_f64(
                    delay.as_secs_f64() * self.config.corpus_retry_backoff_factor,
                );
            }

            match self.provider.get_securities(force_refresh).await {
                Ok(securities) if !securities.is_empty() => return Ok(securities),
                Ok(_) => {
                    last_error = Some(Error::CorpusUnavailable(format!(
                        "Provider {} returned an empty corpus",
                        self.provider.name()
                    )));
                }
                Err(err) => {
                    warn!(
                        "Corpus fetch from {} failed: {}",
                        self.provider.name(),
                        err
                    );
                    last_error = Some(err);
                }
            }
        }

        Err(Error::CorpusUnavailable(match last_error {
            Some(err) => format!("{} after {} attempts", err, attempts),
            None => format!("No attempts made against {}", self.provider.name()),
        }))
    }
}
