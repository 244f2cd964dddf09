// Types listed here are either shared across multiple files and/or exposed via the library.

/// Represents a token as an owned `String`. Tokens are the basic units used for processing
/// security names.
pub type Token = String;

/// Represents a ticker symbol (e.g., `AAPL`, `9988.HK`) as an owned `String`.
pub type TickerSymbol = String;

/// Represents the display name of a company as an owned `String`.
pub type CompanyName = String;

/// A canonical exchange key from the exchange taxonomy (e.g., `NYSE`, `HKEX`).
pub type ExchangeKey = &'static str;

/// Stable per-occurrence identity of an extracted entity: its position in the parsed
/// entity list. Two mentions of the same company on different exchanges get distinct ids.
pub type EntityId = usize;

/// Position of a security within a loaded `SecurityIndex`.
pub type CorpusIndex = usize;

/// Score assigned to a candidate by the prioritization cascade.
pub type SelectionScore = i64;
