use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use ticker_resolver::{
    resolve_oracle_response, CsvSecurityProvider, EntityOracle, Error as LibError, Geography,
    Language, Resolution, Security, SecurityIndex, SecurityProvider,
};
use tokio::sync::Mutex;

pub mod constants;
use constants::TEST_SECURITIES_FILE_PATH;

/// Utility to load securities from a CSV file for testing and benchmarking.
pub fn load_securities_from_file(file_path: &Path) -> Result<Vec<Security>, LibError> {
    let csv = fs::read_to_string(file_path)?;

    CsvSecurityProvider::read_securities_from_string(&csv)
}

/// The shared test corpus, indexed.
pub fn load_test_index() -> SecurityIndex {
    let securities = load_securities_from_file(&TEST_SECURITIES_FILE_PATH)
        .expect("Failed to load test securities");

    SecurityIndex::new(securities)
}

/// Renders groups the way scenario files spell them: `<originalText>: T1, T2`.
pub fn format_groups(resolution: &Resolution) -> Vec<String> {
    resolution
        .groups
        .iter()
        .map(|group| format!("{}: {}", group.original_text, group.tickers.join(", ")))
        .collect()
}

/// A resolution scenario read from a test file.
///
/// Recognized line prefixes: `QUERY:`, `GEOGRAPHY:`, `ORACLE:` (repeatable; the lines are
/// joined with newlines), `EXPECTED:` (one per group) and `COMMENT:`.
#[derive(Debug, Clone, Default)]
pub struct ResolutionScenario {
    pub query: String,
    pub geography: Geography,
    pub oracle_response: String,
    pub expected_groups: Vec<String>,
}

impl ResolutionScenario {
    pub fn from_file(file_path: &Path) -> Result<Self, LibError> {
        let content = fs::read_to_string(file_path)?;
        let mut scenario = ResolutionScenario::default();
        let mut oracle_lines: Vec<&str> = Vec::new();

        for line in content.lines() {
            let line = line.trim();

            if let Some(query) = line.strip_prefix("QUERY:") {
                scenario.query = query.trim().to_string();
            } else if let Some(geography) = line.strip_prefix("GEOGRAPHY:") {
                scenario.geography = geography.parse()?;
            } else if let Some(oracle_line) = line.strip_prefix("ORACLE:") {
                oracle_lines.push(oracle_line.trim());
            } else if let Some(expected) = line.strip_prefix("EXPECTED:") {
                scenario.expected_groups.push(expected.trim().to_string());
            }
        }

        scenario.oracle_response = oracle_lines.join("\n");

        Ok(scenario)
    }
}

/// Runs the scenario in `test_file_path` against `index`, returning the actual and the
/// expected group lines.
pub fn run_test_for_file(
    test_file_path: &Path,
    index: &SecurityIndex,
) -> Result<(Vec<String>, Vec<String>), LibError> {
    let scenario = ResolutionScenario::from_file(test_file_path)?;

    let resolution = resolve_oracle_response(
        &scenario.oracle_response,
        &scenario.query,
        index,
        scenario.geography,
    );

    Ok((format_groups(&resolution), scenario.expected_groups))
}

/// Oracle answering from a script: each call pops the next response; `Err` entries
/// simulate oracle failures. Once the script runs out every call fails.
pub struct ScriptedOracle {
    name: String,
    responses: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(name: &str, responses: Vec<Result<&str, &str>>) -> Self {
        Self {
            name: name.to_string(),
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|response| response.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityOracle for ScriptedOracle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn extract(&self, _query: &str, _language: Language) -> Result<String, LibError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.responses.lock().await.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LibError::ExtractionError(message)),
            None => Err(LibError::ExtractionError("Script exhausted".to_string())),
        }
    }
}

/// Provider that fails its first `failures` calls, optionally pausing before each
/// answer, and counts every call.
pub struct FlakySecurityProvider {
    securities: Vec<Security>,
    failures: usize,
    latency: Duration,
    calls: AtomicUsize,
}

impl FlakySecurityProvider {
    pub fn new(securities: Vec<Security>, failures: usize) -> Self {
        Self {
            securities,
            failures,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecurityProvider for FlakySecurityProvider {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn get_securities(&self, _force_refresh: bool) -> Result<Vec<Security>, LibError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if call < self.failures {
            return Err(LibError::CorpusUnavailable(format!(
                "Simulated outage (call {})",
                call + 1
            )));
        }

        Ok(self.securities.clone())
    }
}
